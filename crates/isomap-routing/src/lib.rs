//! Client for the reachable-range (isochrone) routing API and the normalizer
//! that turns its boundary into a closed [`Ring`](isomap_core::Ring).

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::RoutingClient;
pub use error::{FetchError, NormalizeError};
pub use normalize::{normalize, normalize_boundary};
pub use types::{BoundaryPoint, ReachableRange, ReachableRangeResponse};
