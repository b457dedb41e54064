//! Fetch lifecycle state and its reducer.

use isomap_core::Ring;

/// State of the most recent isochrone fetch.
///
/// Values are never mutated in place; [`reduce`] produces the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    /// A fetch is in flight. `generation` identifies which trigger started it.
    Loading { generation: u64 },
    Success(Ring),
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading { .. })
    }

    /// Short label for logs and status lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading { .. } => "loading",
            FetchStatus::Success(_) => "success",
            FetchStatus::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchEvent {
    Requested { generation: u64 },
    Succeeded { generation: u64, ring: Ring },
    Failed { generation: u64, reason: String },
    Reset,
}

/// Computes the status that follows `status` after `event`.
///
/// A new request always wins. Completions only apply while the matching
/// generation is loading; anything else is stale and leaves the status as is.
#[must_use]
pub fn reduce(status: &FetchStatus, event: FetchEvent) -> FetchStatus {
    match (status, event) {
        (_, FetchEvent::Requested { generation }) => FetchStatus::Loading { generation },
        (_, FetchEvent::Reset) => FetchStatus::Idle,
        (
            FetchStatus::Loading { generation: current },
            FetchEvent::Succeeded { generation, ring },
        ) if *current == generation => FetchStatus::Success(ring),
        (
            FetchStatus::Loading { generation: current },
            FetchEvent::Failed { generation, reason },
        ) if *current == generation => FetchStatus::Failed(reason),
        (current, _) => current.clone(),
    }
}

#[cfg(test)]
mod tests {
    use isomap_core::Position;

    use super::*;

    fn ring() -> Ring {
        Ring::from_open_path(vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn request_moves_to_loading() {
        let next = reduce(&FetchStatus::Idle, FetchEvent::Requested { generation: 1 });
        assert_eq!(next, FetchStatus::Loading { generation: 1 });
        assert!(next.is_loading());
    }

    #[test]
    fn matching_success_completes() {
        let loading = FetchStatus::Loading { generation: 3 };
        let next = reduce(
            &loading,
            FetchEvent::Succeeded {
                generation: 3,
                ring: ring(),
            },
        );
        assert_eq!(next, FetchStatus::Success(ring()));
    }

    #[test]
    fn matching_failure_records_reason() {
        let loading = FetchStatus::Loading { generation: 2 };
        let next = reduce(
            &loading,
            FetchEvent::Failed {
                generation: 2,
                reason: "routing API returned HTTP 500".to_string(),
            },
        );
        assert_eq!(
            next,
            FetchStatus::Failed("routing API returned HTTP 500".to_string())
        );
        assert_eq!(next.label(), "failed");
    }

    #[test]
    fn stale_completion_is_ignored() {
        let loading = FetchStatus::Loading { generation: 5 };
        let next = reduce(
            &loading,
            FetchEvent::Succeeded {
                generation: 4,
                ring: ring(),
            },
        );
        assert_eq!(next, loading);
    }

    #[test]
    fn completion_without_request_is_ignored() {
        let next = reduce(
            &FetchStatus::Idle,
            FetchEvent::Failed {
                generation: 1,
                reason: "late".to_string(),
            },
        );
        assert_eq!(next, FetchStatus::Idle);
    }

    #[test]
    fn new_request_replaces_result() {
        let done = FetchStatus::Success(ring());
        let next = reduce(&done, FetchEvent::Requested { generation: 9 });
        assert_eq!(next, FetchStatus::Loading { generation: 9 });
    }

    #[test]
    fn reset_returns_to_idle() {
        let next = reduce(&FetchStatus::Failed("x".to_string()), FetchEvent::Reset);
        assert_eq!(next, FetchStatus::Idle);
    }
}
