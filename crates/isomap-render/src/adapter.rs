//! Adapters from the canonical ring to each map SDK's polygon shape.
//!
//! The GeoJSON target keeps longitude-first positions, as Azure Maps and any
//! other GeoJSON consumer expect. The lat/lng target emits `{lat, lng}`
//! literals in the order Google Maps `Polygon` paths take.

use geojson::{Feature, Geometry, Value};
use isomap_core::{Bounds, PolygonStyle, Ring};
use serde::Serialize;

use crate::session::{PolygonSource, RingUpdate};
use crate::viewport::{fit_bounds, MapView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    /// GeoJSON `Feature` with a `Polygon` geometry (Azure Maps style).
    GeoJson,
    /// Ordered `{lat, lng}` path plus polygon options (Google Maps style).
    LatLngPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderablePolygon {
    GeoJson(Feature),
    LatLngPath {
        paths: Vec<LatLngLiteral>,
        options: PolygonStyle,
    },
}

/// Rendering SDK key, handed to the Google-style script loader as is.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MapsApiKey(String);

impl MapsApiKey {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for MapsApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MapsApiKey([redacted])")
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub target: RenderTarget,
    pub source: PolygonSource,
    pub view: MapView,
    pub bounds: Bounds,
    pub polygon: RenderablePolygon,
    /// Set only for [`RenderTarget::LatLngPath`]; the GeoJSON target needs
    /// no SDK key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_api_key: Option<MapsApiKey>,
}

/// Builds a GeoJSON feature for `ring` with style attributes as properties.
#[must_use]
pub fn to_geojson_feature(ring: &Ring, style: &PolygonStyle) -> Feature {
    let exterior = ring.to_pairs().into_iter().map(Vec::from).collect();
    let mut feature = Feature::from(Geometry::new(Value::Polygon(vec![exterior])));

    let bounds = ring.bounds();
    feature.bbox = Some(vec![bounds.west, bounds.south, bounds.east, bounds.north]);

    feature.set_property("fillColor", style.fill_color.clone());
    feature.set_property("fillOpacity", style.fill_opacity);
    feature.set_property("strokeColor", style.stroke_color.clone());
    feature.set_property("strokeOpacity", style.stroke_opacity);
    feature.set_property("strokeWidth", style.stroke_weight);
    feature.set_property("zIndex", style.z_index);
    feature
}

/// Re-expresses `ring` as latitude-first literals, closing point included.
#[must_use]
pub fn to_lat_lng_path(ring: &Ring) -> Vec<LatLngLiteral> {
    ring.positions()
        .iter()
        .map(|p| LatLngLiteral {
            lat: p.lat,
            lng: p.lng,
        })
        .collect()
}

/// Renders a ring update for `target`, fitting the view to the ring.
///
/// `maps_api_key` is attached to lat/lng path scenes so the front end can
/// load the Google-style SDK with it.
#[must_use]
pub fn render(
    update: &RingUpdate,
    target: RenderTarget,
    style: &PolygonStyle,
    maps_api_key: Option<&str>,
    width_px: u32,
    height_px: u32,
) -> MapScene {
    let bounds = update.ring.bounds();
    let view = match update.source {
        // The demo page shows the rectangle at its fixed camera.
        PolygonSource::Default => MapView::default(),
        PolygonSource::Isochrone | PolygonSource::Fallback => {
            fit_bounds(&bounds, width_px, height_px)
        }
    };

    let (polygon, maps_api_key) = match target {
        RenderTarget::GeoJson => (
            RenderablePolygon::GeoJson(to_geojson_feature(&update.ring, style)),
            None,
        ),
        RenderTarget::LatLngPath => (
            RenderablePolygon::LatLngPath {
                paths: to_lat_lng_path(&update.ring),
                options: style.clone(),
            },
            maps_api_key.map(|key| MapsApiKey(key.to_owned())),
        ),
    };

    MapScene {
        target,
        source: update.source,
        view,
        bounds,
        polygon,
        maps_api_key,
    }
}

#[cfg(test)]
mod tests {
    use isomap_core::Position;
    use serde_json::json;

    use super::*;

    fn seattle_ring() -> Ring {
        Ring::from_open_path(vec![
            Position::new(-122.0, 47.0),
            Position::new(-122.0, 47.1),
            Position::new(-122.1, 47.1),
        ])
        .unwrap()
    }

    fn update(source: PolygonSource) -> RingUpdate {
        RingUpdate {
            generation: 1,
            ring: seattle_ring(),
            source,
        }
    }

    #[test]
    fn geojson_feature_keeps_lng_lat_order() {
        let feature = to_geojson_feature(&seattle_ring(), &PolygonStyle::default());
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Polygon");
        assert_eq!(
            json["geometry"]["coordinates"],
            json!([[[-122.0, 47.0], [-122.0, 47.1], [-122.1, 47.1], [-122.0, 47.0]]])
        );
        assert_eq!(json["properties"]["fillColor"], "#FF0000");
        assert_eq!(json["properties"]["strokeWidth"], 2);
        assert_eq!(json["bbox"], json!([-122.1, 47.0, -122.0, 47.1]));
    }

    #[test]
    fn lat_lng_path_swaps_axes() {
        let path = to_lat_lng_path(&seattle_ring());
        assert_eq!(path.len(), 4);
        assert_eq!(
            path[1],
            LatLngLiteral {
                lat: 47.1,
                lng: -122.0
            }
        );
        assert_eq!(path[0], path[3]);
    }

    #[test]
    fn lat_lng_scene_serializes_google_options() {
        let scene = render(
            &update(PolygonSource::Isochrone),
            RenderTarget::LatLngPath,
            &PolygonStyle::default(),
            None,
            800,
            500,
        );
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["target"], "lat_lng_path");
        assert_eq!(json["source"], "isochrone");
        assert_eq!(json["polygon"]["paths"][0], json!({ "lat": 47.0, "lng": -122.0 }));
        assert_eq!(json["polygon"]["options"]["strokeWeight"], 2);
        assert_eq!(json["polygon"]["options"]["zIndex"], 1);
    }

    #[test]
    fn isochrone_view_is_fitted_to_ring() {
        let scene = render(
            &update(PolygonSource::Isochrone),
            RenderTarget::GeoJson,
            &PolygonStyle::default(),
            None,
            800,
            500,
        );
        assert!((scene.view.center.lat - 47.05).abs() < 1e-9);
        assert!((scene.view.center.lng - -122.05).abs() < 1e-9);
    }

    #[test]
    fn default_source_keeps_default_view() {
        let scene = render(
            &update(PolygonSource::Default),
            RenderTarget::GeoJson,
            &PolygonStyle::default(),
            None,
            800,
            500,
        );
        assert_eq!(scene.view, MapView::default());
    }

    #[test]
    fn lat_lng_scene_carries_maps_api_key() {
        let scene = render(
            &update(PolygonSource::Isochrone),
            RenderTarget::LatLngPath,
            &PolygonStyle::default(),
            Some("google-secret"),
            800,
            500,
        );
        assert_eq!(
            scene.maps_api_key.as_ref().map(MapsApiKey::expose),
            Some("google-secret")
        );
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["maps_api_key"], "google-secret");
        assert!(!format!("{scene:?}").contains("google-secret"));
    }

    #[test]
    fn geojson_scene_omits_maps_api_key() {
        let scene = render(
            &update(PolygonSource::Isochrone),
            RenderTarget::GeoJson,
            &PolygonStyle::default(),
            Some("google-secret"),
            800,
            500,
        );
        assert!(scene.maps_api_key.is_none());
        let json = serde_json::to_value(&scene).unwrap();
        assert!(json.get("maps_api_key").is_none());
    }
}
