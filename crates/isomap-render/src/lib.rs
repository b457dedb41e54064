//! Rendering side of the isochrone viewer.
//!
//! Holds the per-renderer adapters that turn the canonical
//! [`Ring`](isomap_core::Ring) into the point shape each map SDK expects, the
//! viewport math, and the [`MapSession`] that owns fetch state and publishes
//! ring updates to subscribers.

pub mod adapter;
pub mod defaults;
pub mod session;
pub mod status;
pub mod viewport;

pub use adapter::{
    render, LatLngLiteral, MapScene, MapsApiKey, RenderTarget, RenderablePolygon,
};
pub use session::{MapSession, PolygonSource, RingUpdate};
pub use status::{reduce, FetchEvent, FetchStatus};
pub use viewport::{fit_bounds, MapView};
