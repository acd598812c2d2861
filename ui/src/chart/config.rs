//! Chart appearance settings. Every field has a default so partial JSON works.

use serde::{Deserialize, Serialize};

use crate::core::bands::BandScheme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    /// Upper bound for the rotated category label band under the plot.
    pub max_label_band: f64,
    pub font_family: String,
    pub title_size: f64,
    pub tick_size: f64,
    pub group_label_size: f64,
    pub background: String,
    pub band_scheme: BandScheme,
    pub band_opacity: f64,
    pub grid_color: String,
    pub grid_opacity: f64,
    pub line_color: String,
    pub line_width: f64,
    pub point_radius: f64,
    pub separator_color: String,
    pub separator_width: f64,
    pub text_color: String,
    pub reference_curve_color: String,
    pub reference_curve_width: f64,
    /// Horizontal reach of the reference curve's peak from the plot's left edge.
    pub reference_curve_extent: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 720,
            padding_left: 64.0,
            padding_right: 32.0,
            padding_top: 72.0,
            max_label_band: 250.0,
            font_family: "Inter, Arial, sans-serif".to_string(),
            title_size: 22.0,
            tick_size: 12.0,
            group_label_size: 16.0,
            background: "#ffffff".to_string(),
            band_scheme: BandScheme::Solid,
            band_opacity: 0.35,
            grid_color: "#000000".to_string(),
            grid_opacity: 0.15,
            line_color: "#000000".to_string(),
            line_width: 2.0,
            point_radius: 3.5,
            separator_color: "#000000".to_string(),
            separator_width: 2.0,
            text_color: "#000000".to_string(),
            reference_curve_color: "#808080".to_string(),
            reference_curve_width: 2.0,
            reference_curve_extent: 48.0,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ChartConfig::from_json_str(r#"{"width": 800, "band_scheme": "gradient"}"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.band_scheme, BandScheme::Gradient);
        assert_eq!(config.height, ChartConfig::default().height);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ChartConfig::from_json_str(r#"{"width": "wide"}"#).is_err());
    }
}
