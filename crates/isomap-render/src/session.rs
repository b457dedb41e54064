//! Map session: owns the fetch status and the ring currently on screen.
//!
//! Renderers subscribe to ring updates instead of polling or waiting on a
//! timer; every terminal fetch publishes exactly one [`RingUpdate`]. A new
//! trigger while a fetch is in flight cancels the old one and takes its
//! place.

use std::sync::{Arc, Mutex, PoisonError};

use isomap_core::{LatLng, Ring};
use isomap_routing::RoutingClient;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::status::{reduce, FetchEvent, FetchStatus};

/// Where the ring in a [`RingUpdate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonSource {
    /// Shown before any fetch completes.
    Default,
    /// Fetched from the routing API.
    Isochrone,
    /// Shown because the latest fetch failed.
    Fallback,
}

/// The "ring updated" event published to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RingUpdate {
    /// Generation of the fetch that produced this update; `0` for the
    /// initial default.
    pub generation: u64,
    pub ring: Ring,
    pub source: PolygonSource,
}

#[derive(Default)]
struct InFlight {
    generation: u64,
    handle: Option<AbortHandle>,
}

struct Inner {
    client: RoutingClient,
    fallback: Ring,
    in_flight: Mutex<InFlight>,
    status: watch::Sender<FetchStatus>,
    ring: watch::Sender<RingUpdate>,
}

/// Drives isochrone fetches and publishes their outcome.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct MapSession {
    inner: Arc<Inner>,
}

impl MapSession {
    /// Creates a session that shows `fallback` until a fetch succeeds and
    /// again whenever one fails.
    #[must_use]
    pub fn new(client: RoutingClient, fallback: Ring) -> Self {
        let (status, _) = watch::channel(FetchStatus::Idle);
        let (ring, _) = watch::channel(RingUpdate {
            generation: 0,
            ring: fallback.clone(),
            source: PolygonSource::Default,
        });

        Self {
            inner: Arc::new(Inner {
                client,
                fallback,
                in_flight: Mutex::new(InFlight::default()),
                status,
                ring,
            }),
        }
    }

    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.inner.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<FetchStatus> {
        self.inner.status.subscribe()
    }

    /// Subscribes to ring updates. The receiver starts at the current ring.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RingUpdate> {
        self.inner.ring.subscribe()
    }

    #[must_use]
    pub fn current_ring(&self) -> RingUpdate {
        self.inner.ring.borrow().clone()
    }

    /// Starts a fetch and returns its generation without waiting for it.
    ///
    /// Any fetch still in flight is aborted; if it had already produced a
    /// result, the reducer discards it as stale.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn trigger(&self, origin: LatLng, time_budget_secs: u32) -> u64 {
        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = in_flight.handle.take() {
            if !previous.is_finished() {
                tracing::info!(
                    generation = in_flight.generation,
                    "cancelling in-flight isochrone fetch"
                );
            }
            previous.abort();
        }

        in_flight.generation += 1;
        let generation = in_flight.generation;
        self.inner.apply(FetchEvent::Requested { generation });
        tracing::debug!(generation, %origin, time_budget_secs, "isochrone fetch triggered");

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = inner.client.fetch_isochrone(origin, time_budget_secs).await;
            let event = match result {
                Ok(ring) => FetchEvent::Succeeded { generation, ring },
                Err(err) => {
                    tracing::warn!(generation, error = %err, "isochrone fetch failed");
                    FetchEvent::Failed {
                        generation,
                        reason: err.to_string(),
                    }
                }
            };
            inner.apply(event);
        });
        in_flight.handle = Some(task.abort_handle());

        generation
    }

    /// Aborts any in-flight fetch and returns the status to idle. The ring
    /// on screen is left as it is.
    pub fn reset(&self) {
        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = in_flight.handle.take() {
            handle.abort();
        }
        // Completions that slip past the abort find `Idle` and are dropped.
        self.inner.apply(FetchEvent::Reset);
    }

    /// Starts a fetch and waits until it reaches a terminal status or is
    /// superseded by a newer trigger. Returns the status at that point.
    pub async fn fetch(&self, origin: LatLng, time_budget_secs: u32) -> FetchStatus {
        let mut status_rx = self.subscribe_status();
        let generation = self.trigger(origin, time_budget_secs);

        let settled = status_rx
            .wait_for(|s| !matches!(s, FetchStatus::Loading { generation: g } if *g == generation))
            .await
            .map(|s| s.clone());

        settled.unwrap_or_else(|_| self.status())
    }
}

impl Inner {
    /// Runs the reducer and, when the fetch reached a terminal state,
    /// publishes the matching ring update.
    fn apply(&self, event: FetchEvent) {
        let generation = match &event {
            FetchEvent::Requested { generation }
            | FetchEvent::Succeeded { generation, .. }
            | FetchEvent::Failed { generation, .. } => *generation,
            FetchEvent::Reset => 0,
        };

        let mut settled = None;
        self.status.send_if_modified(|status| {
            let next = reduce(status, event);
            if next == *status {
                return false;
            }
            *status = next;
            settled = match status {
                FetchStatus::Success(ring) => Some((ring.clone(), PolygonSource::Isochrone)),
                FetchStatus::Failed(_) => Some((self.fallback.clone(), PolygonSource::Fallback)),
                FetchStatus::Idle | FetchStatus::Loading { .. } => None,
            };
            true
        });

        if let Some((ring, source)) = settled {
            self.ring.send_replace(RingUpdate {
                generation,
                ring,
                source,
            });
        }
    }
}
