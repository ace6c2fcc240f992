//! Shared configuration for Hongzhi
//!
//! This crate provides the single source of truth for the drawing container
//! layout and for the empirically tuned constants of the drawing engine
//! (jitter filter, ink physics, history depth, pixel budget).

mod tuning;

use serde::{Deserialize, Serialize};

pub use tuning::{ConfigError, CutTuning, EngineConfig, InkTuning};

/// Default container width in logical pixels
pub const DEFAULT_WIDTH: f32 = 800.0;

/// Default container height in logical pixels
pub const DEFAULT_HEIGHT: f32 = 800.0;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Layout of the element hosting the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Container width in logical pixels
    pub width: f32,
    /// Container height in logical pixels
    pub height: f32,
    /// Device pixel ratio
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Create a new display config with the given logical dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
        }
    }

    /// Builder-style device pixel ratio override
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Device pixel ratio, treating non-positive or NaN values as 1.0
    pub fn device_pixel_ratio(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            DEFAULT_SCALE
        }
    }
}
