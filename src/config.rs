use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

pub const DEFAULT_VERTEX_RADIUS: f32 = 5.0;
pub const DEFAULT_EDGE_BAND_WIDTH: f32 = 10.0;
pub const DEFAULT_MIN_HUE_DISTANCE: f32 = 60.0;

/// Tunable editor settings.
///
/// We derive Deserialize/Serialize so the host app can persist them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    /// Radius around a polygon vertex that grabs it, and the tolerance for
    /// closing a polygon on its first vertex
    pub vertex_radius: f32,
    /// Width of the band along a box's edges that resizes instead of moving
    pub edge_band_width: f32,
    /// Minimum hue separation (degrees) between consecutive shape colors
    pub min_hue_distance: f32,
    pub border_width: f32,
    pub selected_fill_alpha: f32,
    pub unselected_fill_alpha: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            vertex_radius: DEFAULT_VERTEX_RADIUS,
            edge_band_width: DEFAULT_EDGE_BAND_WIDTH,
            min_hue_distance: DEFAULT_MIN_HUE_DISTANCE,
            border_width: 2.0,
            selected_fill_alpha: 0.35,
            unselected_fill_alpha: 0.1,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config, filling missing fields with defaults
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> EditorResult<()> {
        if !(self.vertex_radius.is_finite() && self.vertex_radius > 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "vertex_radius must be positive, got {}",
                self.vertex_radius
            )));
        }
        if !(self.edge_band_width.is_finite() && self.edge_band_width > 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "edge_band_width must be positive, got {}",
                self.edge_band_width
            )));
        }
        // A separation of 180 or more can never be satisfied
        if !(0.0..180.0).contains(&self.min_hue_distance) {
            return Err(EditorError::InvalidConfig(format!(
                "min_hue_distance must be in [0, 180), got {}",
                self.min_hue_distance
            )));
        }
        for (name, alpha) in [
            ("selected_fill_alpha", self.selected_fill_alpha),
            ("unselected_fill_alpha", self.unselected_fill_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(EditorError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, alpha
                )));
            }
        }
        Ok(())
    }
}
