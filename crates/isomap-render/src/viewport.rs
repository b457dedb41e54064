//! Map viewport: center, zoom, and fitting a zoom level to a bounding box.

use std::f64::consts::{LN_2, PI};

use isomap_core::{Bounds, LatLng};
use serde::Serialize;

use crate::defaults::{CONTAINER_HEIGHT, CONTAINER_WIDTH, DEFAULT_CENTER, DEFAULT_ZOOM};

const TILE_SIZE: f64 = 256.0;
const MAX_ZOOM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub container_width: &'static str,
    pub container_height: &'static str,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            container_width: CONTAINER_WIDTH,
            container_height: CONTAINER_HEIGHT,
        }
    }
}

/// Largest whole zoom at which `bounds` fits a `width_px` × `height_px`
/// Web Mercator viewport, centered on the middle of the box.
#[must_use]
pub fn fit_bounds(bounds: &Bounds, width_px: u32, height_px: u32) -> MapView {
    let lat_fraction = (mercator_lat(bounds.north) - mercator_lat(bounds.south)) / PI;

    let mut lng_span = bounds.east - bounds.west;
    if lng_span < 0.0 {
        lng_span += 360.0;
    }
    let lng_fraction = lng_span / 360.0;

    let zoom = zoom_for(height_px, lat_fraction)
        .min(zoom_for(width_px, lng_fraction))
        .min(MAX_ZOOM)
        .max(0.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let zoom = zoom.floor() as u8;

    MapView {
        center: bounds.center(),
        zoom,
        ..MapView::default()
    }
}

fn mercator_lat(lat: f64) -> f64 {
    let sin = lat.to_radians().sin();
    let rad_x2 = ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
    rad_x2.clamp(-PI, PI) / 2.0
}

fn zoom_for(map_px: u32, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return f64::INFINITY;
    }
    (f64::from(map_px) / TILE_SIZE / fraction).ln() / LN_2
}
