//! Engine tunables
//!
//! None of these values are physically derived; they were tuned by hand
//! against pointer input from mice, trackpads and touch screens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Paper-cutting tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutTuning {
    /// Pointer samples closer than this (buffer pixels) to the last accepted
    /// sample are dropped as jitter
    pub min_draw_distance: f64,
    /// Snapshot depth for undo
    pub history_capacity: usize,
    /// Radius of the pointer-down dot as a fraction of the stroke width
    pub dot_radius_ratio: f64,
}

impl Default for CutTuning {
    fn default() -> Self {
        Self {
            min_draw_distance: 4.0,
            history_capacity: 20,
            dot_radius_ratio: 0.25,
        }
    }
}

/// Calligraphy ink tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkTuning {
    /// Width floor as a fraction of the nominal brush size
    pub min_width_ratio: f64,
    /// Width at rest as a fraction of the nominal brush size
    pub max_width_ratio: f64,
    /// Width lost per unit of velocity (px/ms), as a fraction of brush size
    pub velocity_weight: f64,
    /// Weight of the new target in the exponential width smoothing
    pub smoothing: f64,
    /// Diameter of the very first dab as a fraction of brush size
    pub first_dab_ratio: f64,
    /// Moves shorter than this (buffer pixels) are ignored
    pub min_draw_distance: f64,
    /// Snapshot depth for undo
    pub history_capacity: usize,
}

impl Default for InkTuning {
    fn default() -> Self {
        Self {
            min_width_ratio: 0.5,
            max_width_ratio: 0.6,
            velocity_weight: 0.02,
            smoothing: 0.3,
            first_dab_ratio: 0.8,
            min_draw_distance: 1.5,
            history_capacity: 10,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cut: CutTuning,
    pub ink: InkTuning,
    /// Upper bound on `width * height` of the raster buffer
    pub pixel_budget: u64,
    /// Delay between the end of a cut gesture and the connectivity pass
    pub prune_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cut: CutTuning::default(),
            ink: InkTuning::default(),
            pixel_budget: 4000 * 4000,
            prune_delay_ms: 10,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable is inside the range the engine can work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn out_of_range(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::OutOfRange {
                field,
                reason: reason.into(),
            }
        }

        if self.pixel_budget == 0 {
            return Err(out_of_range("pixel_budget", "must be at least 1"));
        }
        if !(self.cut.min_draw_distance >= 0.0) {
            return Err(out_of_range("cut.min_draw_distance", "must be >= 0"));
        }
        if self.cut.history_capacity == 0 {
            return Err(out_of_range("cut.history_capacity", "must be at least 1"));
        }
        if !(self.cut.dot_radius_ratio >= 0.0) {
            return Err(out_of_range("cut.dot_radius_ratio", "must be >= 0"));
        }

        let ink = &self.ink;
        if !(ink.min_width_ratio > 0.0) {
            return Err(out_of_range("ink.min_width_ratio", "must be > 0"));
        }
        if !(ink.max_width_ratio >= ink.min_width_ratio) {
            return Err(out_of_range(
                "ink.max_width_ratio",
                format!("must be >= min_width_ratio ({})", ink.min_width_ratio),
            ));
        }
        if !(ink.velocity_weight >= 0.0) {
            return Err(out_of_range("ink.velocity_weight", "must be >= 0"));
        }
        if !(ink.smoothing > 0.0 && ink.smoothing <= 1.0) {
            return Err(out_of_range("ink.smoothing", "must be in (0, 1]"));
        }
        if !(ink.first_dab_ratio > 0.0) {
            return Err(out_of_range("ink.first_dab_ratio", "must be > 0"));
        }
        if !(ink.min_draw_distance >= 0.0) {
            return Err(out_of_range("ink.min_draw_distance", "must be >= 0"));
        }
        if ink.history_capacity == 0 {
            return Err(out_of_range("ink.history_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pixel_budget, 16_000_000);
        assert_eq!(config.cut.history_capacity, 20);
        assert_eq!(config.ink.history_capacity, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "ink": { "velocity_weight": 0.05 } }"#).unwrap();
        assert_eq!(config.ink.velocity_weight, 0.05);
        assert_eq!(config.ink.max_width_ratio, 0.6);
        assert_eq!(config.cut.min_draw_distance, 4.0);
        assert_eq!(config.prune_delay_ms, 10);
    }

    #[test]
    fn test_rejects_inverted_width_ratios() {
        let err = EngineConfig::from_json_str(
            r#"{ "ink": { "min_width_ratio": 0.8, "max_width_ratio": 0.6 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "ink.max_width_ratio", .. }));
    }

    #[test]
    fn test_rejects_zero_history() {
        let err = EngineConfig::from_json_str(r#"{ "cut": { "history_capacity": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "cut.history_capacity", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
