use isomap_core::GeoError;
use thiserror::Error;

/// Errors produced while turning a reachable-range payload into a ring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// `reachableRange.boundary` is absent or empty.
    #[error("response has no reachableRange.boundary")]
    MissingBoundary,

    /// The boundary cannot form a ring (too few distinct points, non-finite
    /// coordinates).
    #[error("boundary does not form a ring: {0}")]
    InvalidRing(#[from] GeoError),
}

/// Errors returned by [`RoutingClient`](crate::RoutingClient).
///
/// None of these are retried; each is terminal for the attempt that raised it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No subscription key configured. Raised before any request is sent.
    #[error("routing subscription key is missing")]
    Auth,

    /// The routing API answered with a non-2xx status.
    #[error("routing API returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The payload decoded but holds no usable boundary.
    #[error("invalid isochrone data: {0}")]
    Data(#[from] NormalizeError),

    /// The body is not JSON of the expected shape.
    #[error("JSON deserialization error for reachable range response: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },

    /// Network, TLS or timeout failure. The request URL is stripped so the
    /// subscription key never reaches logs.
    #[error("HTTP error: {0}")]
    Transport(reqwest::Error),

    /// Origin or time budget rejected before sending.
    #[error("invalid isochrone request: {0}")]
    InvalidRequest(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl FetchError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}
