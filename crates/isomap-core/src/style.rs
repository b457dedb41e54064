use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Static visual attributes applied to every rendered polygon.
///
/// Serializes with camelCase keys, the shape polygon `options` take in the
/// JavaScript map SDKs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub z_index: i32,
    pub clickable: bool,
    pub draggable: bool,
    pub editable: bool,
    pub geodesic: bool,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: "#FF0000".to_string(),
            fill_opacity: 0.35,
            stroke_color: "#FF0000".to_string(),
            stroke_opacity: 0.8,
            stroke_weight: 2,
            z_index: 1,
            clickable: false,
            draggable: false,
            editable: false,
            geodesic: false,
        }
    }
}

impl PolygonStyle {
    /// Returns a copy with any fields set in `overrides` replaced.
    #[must_use]
    pub fn with_overrides(&self, overrides: &StyleOverrides) -> Self {
        let mut style = self.clone();
        if let Some(c) = &overrides.fill_color {
            style.fill_color.clone_from(c);
        }
        if let Some(o) = overrides.fill_opacity {
            style.fill_opacity = o;
        }
        if let Some(c) = &overrides.stroke_color {
            style.stroke_color.clone_from(c);
        }
        if let Some(o) = overrides.stroke_opacity {
            style.stroke_opacity = o;
        }
        if let Some(w) = overrides.stroke_weight {
            style.stroke_weight = w;
        }
        if let Some(z) = overrides.z_index {
            style.z_index = z;
        }
        style
    }
}

/// Optional style fields read from the YAML file named by `ISOMAP_STYLE_PATH`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    pub fill_color: Option<String>,
    pub fill_opacity: Option<f64>,
    pub stroke_color: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub stroke_weight: Option<u32>,
    pub z_index: Option<i32>,
}

/// Load and validate style overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_style(path: &Path) -> Result<StyleOverrides, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StyleFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_style(&content)
}

fn parse_style(content: &str) -> Result<StyleOverrides, ConfigError> {
    let overrides: StyleOverrides = serde_yaml::from_str(content)?;
    validate_style(&overrides)?;
    Ok(overrides)
}

fn validate_style(overrides: &StyleOverrides) -> Result<(), ConfigError> {
    for (field, color) in [
        ("fill_color", &overrides.fill_color),
        ("stroke_color", &overrides.stroke_color),
    ] {
        if let Some(c) = color {
            if !is_hex_color(c) {
                return Err(ConfigError::Validation(format!(
                    "{field} '{c}' must be a #RRGGBB color"
                )));
            }
        }
    }

    for (field, opacity) in [
        ("fill_opacity", overrides.fill_opacity),
        ("stroke_opacity", overrides.stroke_opacity),
    ] {
        if let Some(o) = opacity {
            if !(0.0..=1.0).contains(&o) {
                return Err(ConfigError::Validation(format!(
                    "{field} {o} must be between 0 and 1"
                )));
            }
        }
    }

    Ok(())
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
