//! Engine tuning: handle sizes, snapping, thresholds.
//!
//! Hosts pass a JSON object; absent keys fall back to the defaults in
//! [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BACKGROUND_SIZE_THRESHOLD, DOUBLE_CLICK_MS, HANDLE_RADIUS_PX, MIN_SCALE, ROTATE_HANDLE_OFFSET_PX, ROTATE_SNAP_DEG,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-size of a transform handle's hit square, in screen pixels.
    pub handle_radius_px: f64,
    /// Gap between the top of the selection bounds and the rotate handle, in screen pixels.
    pub rotate_handle_offset_px: f64,
    /// Smallest absolute scale reachable by a scale gesture.
    pub min_scale: f64,
    /// Rotation snap increment in degrees.
    pub rotate_snap_deg: f64,
    /// Double-click window in milliseconds.
    pub double_click_ms: f64,
    /// Objects larger than this in either dimension are treated as backgrounds.
    pub background_size_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handle_radius_px: HANDLE_RADIUS_PX,
            rotate_handle_offset_px: ROTATE_HANDLE_OFFSET_PX,
            min_scale: MIN_SCALE,
            rotate_snap_deg: ROTATE_SNAP_DEG,
            double_click_ms: DOUBLE_CLICK_MS,
            background_size_threshold: BACKGROUND_SIZE_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::NotPositive`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make hit-testing or snapping degenerate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("handle_radius_px", self.handle_radius_px),
            ("rotate_handle_offset_px", self.rotate_handle_offset_px),
            ("min_scale", self.min_scale),
            ("rotate_snap_deg", self.rotate_snap_deg),
            ("double_click_ms", self.double_click_ms),
            ("background_size_threshold", self.background_size_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}
