//! Built-in map defaults: the San Francisco demo view and polygon.

use isomap_core::{GeoError, LatLng, Position, Ring};

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.7749,
    lng: -122.4194,
};

pub const DEFAULT_ZOOM: u8 = 14;

/// CSS size of the map container.
pub const CONTAINER_WIDTH: &str = "100%";
pub const CONTAINER_HEIGHT: &str = "500px";

/// Corners of the demo rectangle as `(lat, lng)`.
const DEMO_PATH: [(f64, f64); 4] = [
    (37.782, -122.447),
    (37.782, -122.443),
    (37.778, -122.443),
    (37.778, -122.447),
];

/// The demo rectangle closed into a ring. Also used as the fallback polygon
/// whenever an isochrone fetch fails.
///
/// # Errors
///
/// Never fails for the built-in path; the `Result` comes from
/// [`Ring::from_open_path`].
pub fn demo_ring() -> Result<Ring, GeoError> {
    Ring::from_open_path(
        DEMO_PATH
            .iter()
            .map(|&(lat, lng)| Position::new(lng, lat))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_ring_is_closed_rectangle() {
        let ring = demo_ring().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.positions()[0], Position::new(-122.447, 37.782));
        assert_eq!(ring.positions()[4], ring.positions()[0]);
    }

    #[test]
    fn demo_ring_is_near_default_center() {
        let center = demo_ring().unwrap().bounds().center();
        assert!((center.lat - DEFAULT_CENTER.lat).abs() < 0.01);
        assert!((center.lng - DEFAULT_CENTER.lng).abs() < 0.03);
    }
}
