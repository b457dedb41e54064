//! Reachable-range API response types.
//!
//! Only the fields this workspace reads are modelled; anything else the
//! provider sends is ignored.

use serde::Deserialize;

/// Top-level body of a `route/range` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachableRangeResponse {
    #[serde(default)]
    pub format_version: Option<String>,
    #[serde(default)]
    pub reachable_range: Option<ReachableRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReachableRange {
    /// The origin as snapped by the provider.
    #[serde(default)]
    pub center: Option<BoundaryPoint>,
    /// Polygon outline, already ordered by the provider.
    #[serde(default)]
    pub boundary: Option<Vec<BoundaryPoint>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundaryPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_payload() {
        let body = r#"{
            "formatVersion": "0.0.1",
            "reachableRange": {
                "center": { "latitude": 47.0, "longitude": -122.0 },
                "boundary": [
                    { "latitude": 47.0, "longitude": -122.0 },
                    { "latitude": 47.1, "longitude": -122.0 }
                ]
            }
        }"#;
        let parsed: ReachableRangeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.format_version.as_deref(), Some("0.0.1"));
        let range = parsed.reachable_range.unwrap();
        assert_eq!(
            range.center,
            Some(BoundaryPoint {
                latitude: 47.0,
                longitude: -122.0
            })
        );
        assert_eq!(range.boundary.unwrap().len(), 2);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let parsed: ReachableRangeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.reachable_range.is_none());

        let parsed: ReachableRangeResponse =
            serde_json::from_str(r#"{"reachableRange": {}}"#).unwrap();
        assert!(parsed.reachable_range.unwrap().boundary.is_none());
    }

    #[test]
    fn wrongly_typed_boundary_is_an_error() {
        let result =
            serde_json::from_str::<ReachableRangeResponse>(r#"{"reachableRange":{"boundary":"x"}}"#);
        assert!(result.is_err());
    }
}
