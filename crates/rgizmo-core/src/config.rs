//! View configuration for a gizmo instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GizmoError, Result};

/// Sizing and thickness parameters of a gizmo.
///
/// Lengths are fractions of the gizmo radius, which itself is `size` times the
/// camera-to-pivot distance. Thicknesses are in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Gizmo radius as a fraction of the camera distance.
    pub size: f32,
    /// Line thickness of rings and axis lines, in pixels.
    pub handle_draw_thickness: f32,
    /// Line thickness of the active-axis guide lines, in pixels.
    pub active_axis_draw_thickness: f32,
    /// Distance from the pivot to the base of an axis tip.
    pub axis_handle_length: f32,
    /// Length of the cone at the end of an axis handle.
    pub axis_handle_tip_length: f32,
    /// Base radius of the cone at the end of an axis handle.
    pub axis_handle_tip_radius: f32,
    /// Diagonal offset of a plane handle from the pivot.
    pub plane_handle_offset: f32,
    /// Edge length of a plane handle.
    pub plane_handle_size: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            size: 0.12,
            handle_draw_thickness: 5.0,
            active_axis_draw_thickness: 2.0,
            axis_handle_length: 1.2,
            axis_handle_tip_length: 0.3,
            axis_handle_tip_radius: 0.1,
            plane_handle_offset: 0.4,
            plane_handle_size: 0.2,
        }
    }
}

impl ViewConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gizmo size.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the handle line thickness in pixels.
    #[must_use]
    pub fn with_handle_draw_thickness(mut self, thickness: f32) -> Self {
        self.handle_draw_thickness = thickness;
        self
    }

    /// Sets the active-axis line thickness in pixels.
    #[must_use]
    pub fn with_active_axis_draw_thickness(mut self, thickness: f32) -> Self {
        self.active_axis_draw_thickness = thickness;
        self
    }

    /// Sets the axis handle length.
    #[must_use]
    pub fn with_axis_handle_length(mut self, length: f32) -> Self {
        self.axis_handle_length = length;
        self
    }

    /// Sets the axis tip length and radius.
    #[must_use]
    pub fn with_axis_handle_tip(mut self, length: f32, radius: f32) -> Self {
        self.axis_handle_tip_length = length;
        self.axis_handle_tip_radius = radius;
        self
    }

    /// Sets the plane handle offset and size.
    #[must_use]
    pub fn with_plane_handle(mut self, offset: f32, size: f32) -> Self {
        self.plane_handle_offset = offset;
        self.plane_handle_size = size;
        self
    }

    /// Checks that every value is finite and in range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("size", self.size),
            ("handle_draw_thickness", self.handle_draw_thickness),
            ("active_axis_draw_thickness", self.active_axis_draw_thickness),
            ("axis_handle_length", self.axis_handle_length),
            ("axis_handle_tip_length", self.axis_handle_tip_length),
            ("axis_handle_tip_radius", self.axis_handle_tip_radius),
            ("plane_handle_size", self.plane_handle_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GizmoError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.plane_handle_offset.is_finite() || self.plane_handle_offset < 0.0 {
            return Err(GizmoError::InvalidConfig(format!(
                "plane_handle_offset must be non-negative, got {}",
                self.plane_handle_offset
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size, 0.12);
        assert_eq!(config.axis_handle_length, 1.2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewConfig::from_json(r#"{ "size": 0.2 }"#).unwrap();
        assert_eq!(config.size, 0.2);
        assert_eq!(config.plane_handle_size, 0.2);
        assert_eq!(config.handle_draw_thickness, 5.0);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let err = ViewConfig::new().with_size(0.0).validate().unwrap_err();
        assert!(matches!(err, GizmoError::InvalidConfig(_)));

        let err = ViewConfig::from_json(r#"{ "plane_handle_offset": -1.0 }"#).unwrap_err();
        assert!(matches!(err, GizmoError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ViewConfig::from_json("{ size: }").unwrap_err();
        assert!(matches!(err, GizmoError::JsonError(_)));
    }
}
