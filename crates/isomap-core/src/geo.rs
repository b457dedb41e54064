//! Canonical coordinate types shared by the routing client and the renderers.
//!
//! Everything inside the workspace uses [`Position`] (longitude first, the
//! GeoJSON order) and [`Ring`]. Conversions to other point shapes happen only
//! at the edge of each rendering adapter.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Minimum number of distinct vertices for a ring to enclose an area.
pub const MIN_RING_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("expected \"lat,lng\", got \"{0}\"")]
    Parse(String),

    #[error("path has no positions")]
    EmptyPath,

    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },

    #[error(
        "path has {distinct} distinct position(s); a ring needs at least {}",
        MIN_RING_VERTICES
    )]
    Degenerate { distinct: usize },
}

/// A geographic point in latitude-first order, as humans and the routing
/// query string write it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a point after range-checking both axes.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::LatitudeOutOfRange`] or
    /// [`GeoError::LongitudeOutOfRange`] for values outside the WGS84 range
    /// (NaN fails both checks).
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for LatLng {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoError::Parse(s.to_string()))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Parse(s.to_string()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Parse(s.to_string()))?;
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A point in longitude-first order. Serializes as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

impl Position {
    #[must_use]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    #[must_use]
    pub fn to_pair(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    fn is_finite(self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Hashable key with `-0.0` folded into `0.0` so it agrees with `==`.
    fn key(self) -> (u64, u64) {
        ((self.lng + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }
}

impl From<LatLng> for Position {
    fn from(p: LatLng) -> Self {
        Self::new(p.lng, p.lat)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_pair().serialize(serializer)
    }
}

/// A closed polygon ring in longitude-first order.
///
/// The first and last positions are always equal and the ring has at least
/// [`MIN_RING_VERTICES`] distinct vertices. The only way to build one is
/// [`Ring::from_open_path`], so every `Ring` in the program upholds this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ring(Vec<Position>);

impl Ring {
    /// Closes `path` into a ring.
    ///
    /// The order of `path` is kept as given. If the last position differs
    /// from the first (exact comparison), a copy of the first is appended;
    /// an already closed path is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`GeoError::EmptyPath`] when `path` is empty.
    /// - [`GeoError::NonFinite`] when any coordinate is NaN or infinite.
    /// - [`GeoError::Degenerate`] when fewer than three distinct positions
    ///   remain, which covers one- and two-point boundaries.
    pub fn from_open_path(mut path: Vec<Position>) -> Result<Self, GeoError> {
        let Some(&first) = path.first() else {
            return Err(GeoError::EmptyPath);
        };

        if let Some(index) = path.iter().position(|p| !p.is_finite()) {
            return Err(GeoError::NonFinite { index });
        }

        let distinct = path.iter().map(|p| p.key()).collect::<HashSet<_>>().len();
        if distinct < MIN_RING_VERTICES {
            return Err(GeoError::Degenerate { distinct });
        }

        if path.last() != Some(&first) {
            path.push(first);
        }

        Ok(Self(path))
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    /// Number of positions including the closing one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the ring has no positions. A constructed ring always has at
    /// least four, so this is `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.0.iter().map(|p| p.to_pair()).collect()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            west: f64::INFINITY,
            south: f64::INFINITY,
            east: f64::NEG_INFINITY,
            north: f64::NEG_INFINITY,
        };
        for p in &self.0 {
            bounds.west = bounds.west.min(p.lng);
            bounds.east = bounds.east.max(p.lng);
            bounds.south = bounds.south.min(p.lat);
            bounds.north = bounds.north.max(p.lat);
        }
        bounds
    }
}

/// Axis-aligned bounding box. Rings crossing the antimeridian are not
/// special-cased.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: f64::midpoint(self.south, self.north),
            lng: f64::midpoint(self.west, self.east),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> Vec<Position> {
        points.iter().map(|&(lng, lat)| Position::new(lng, lat)).collect()
    }

    #[test]
    fn open_path_is_closed_with_first_position() {
        let ring =
            Ring::from_open_path(path(&[(-122.0, 47.0), (-122.0, 47.1), (-122.1, 47.1)])).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.positions().first(), ring.positions().last());
    }

    #[test]
    fn closed_path_is_unchanged() {
        let input = path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let ring = Ring::from_open_path(input.clone()).unwrap();
        assert_eq!(ring.positions(), input.as_slice());
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(Ring::from_open_path(vec![]), Err(GeoError::EmptyPath));
    }

    #[test]
    fn single_point_is_degenerate() {
        assert_eq!(
            Ring::from_open_path(path(&[(1.0, 2.0)])),
            Err(GeoError::Degenerate { distinct: 1 })
        );
    }

    #[test]
    fn closed_two_point_path_is_degenerate() {
        assert_eq!(
            Ring::from_open_path(path(&[(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)])),
            Err(GeoError::Degenerate { distinct: 2 })
        );
    }

    #[test]
    fn signed_zero_counts_as_one_position() {
        assert_eq!(
            Ring::from_open_path(path(&[(0.0, 0.0), (-0.0, 0.0), (1.0, 1.0)])),
            Err(GeoError::Degenerate { distinct: 2 })
        );
    }

    #[test]
    fn nan_is_rejected_with_index() {
        assert_eq!(
            Ring::from_open_path(path(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)])),
            Err(GeoError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn closed_ring_is_never_empty() {
        let ring = Ring::from_open_path(path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        assert!(!ring.is_empty());
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn ring_serializes_as_lng_lat_pairs() {
        let ring = Ring::from_open_path(path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        let json = serde_json::to_value(&ring).unwrap();
        assert_eq!(
            json,
            serde_json::json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
        );
    }

    #[test]
    fn bounds_and_center() {
        let ring =
            Ring::from_open_path(path(&[(-122.447, 37.782), (-122.443, 37.782), (-122.443, 37.778)]))
                .unwrap();
        let b = ring.bounds();
        assert_eq!(b.west, -122.447);
        assert_eq!(b.east, -122.443);
        assert_eq!(b.south, 37.778);
        assert_eq!(b.north, 37.782);
        let c = b.center();
        assert!((c.lat - 37.78).abs() < 1e-9);
        assert!((c.lng - -122.445).abs() < 1e-9);
    }

    #[test]
    fn lat_lng_parses_with_spaces() {
        let p: LatLng = " 37.7749 , -122.4194 ".parse().unwrap();
        assert_eq!(p, LatLng { lat: 37.7749, lng: -122.4194 });
    }

    #[test]
    fn lat_lng_rejects_garbage_and_range() {
        assert!(matches!("abc".parse::<LatLng>(), Err(GeoError::Parse(_))));
        assert!(matches!("1,x".parse::<LatLng>(), Err(GeoError::Parse(_))));
        assert_eq!(
            "0,181".parse::<LatLng>(),
            Err(GeoError::LongitudeOutOfRange(181.0))
        );
        assert!(matches!(
            LatLng::new(f64::NAN, 0.0),
            Err(GeoError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn lat_lng_display_matches_query_format() {
        let p = LatLng::new(47.0, -122.0).unwrap();
        assert_eq!(p.to_string(), "47,-122");
    }
}
