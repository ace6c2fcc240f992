//! Velocity-dependent ink width for calligraphy strokes
//!
//! Fast strokes thin the line, slow strokes let the ink spread. The model
//! turns accepted pointer samples into circular dabs whose radius eases from
//! the previous width toward a velocity-derived target.

use hongzhi_config::InkTuning;
use kurbo::Point;
use tracing::debug;

use crate::types::StrokePoint;

/// A single circular ink deposit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkDab {
    /// Center in buffer pixels
    pub center: Point,
    /// Radius in pixels
    pub radius: f64,
}

/// Per-gesture ink state
#[derive(Debug, Clone)]
pub struct InkPhysicsModel {
    tuning: InkTuning,
    /// Nominal brush diameter in device pixels
    brush_px: f64,
    last_point: StrokePoint,
    /// Current stroke width (diameter)
    width: f64,
}

impl InkPhysicsModel {
    /// Start a gesture. Returns the model and the bootstrap dab, whose width
    /// is fixed because velocity is not yet defined.
    pub fn begin(start: StrokePoint, brush_px: f64, tuning: &InkTuning) -> (Self, InkDab) {
        let width = brush_px * tuning.first_dab_ratio;
        let model = Self {
            tuning: tuning.clone(),
            brush_px,
            last_point: start,
            width,
        };
        let dab = InkDab {
            center: start.point(),
            radius: width / 2.0,
        };
        (model, dab)
    }

    /// Current width (diameter) in pixels
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn last_point(&self) -> StrokePoint {
        self.last_point
    }

    /// Width the model eases toward at `velocity` (px/ms)
    pub fn target_width(&self, velocity: f64) -> f64 {
        let b = self.brush_px;
        let floor = b * self.tuning.min_width_ratio;
        let rest = b * self.tuning.max_width_ratio - velocity * self.tuning.velocity_weight * b;
        floor.max(rest)
    }

    /// Feed the next sample. Returns the dabs covering the segment from the
    /// previous sample, or nothing if the sample was ignored.
    pub fn advance(&mut self, point: StrokePoint) -> Vec<InkDab> {
        let dt = point.time_ms - self.last_point.time_ms;
        if dt == 0.0 && point.x == self.last_point.x && point.y == self.last_point.y {
            return Vec::new();
        }
        let from = self.last_point.point();
        let to = point.point();
        let distance = from.distance(to);
        if distance < self.tuning.min_draw_distance {
            return Vec::new();
        }

        let dt = if dt == 0.0 { 1.0 } else { dt };
        let velocity = distance / dt;
        let smoothing = self.tuning.smoothing;
        let new_width = self.width * (1.0 - smoothing) + self.target_width(velocity) * smoothing;

        let step = (new_width / 3.0).max(1.0);
        let steps = (distance / step).ceil().max(1.0) as usize;
        let dabs = (0..steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                InkDab {
                    center: from.lerp(to, t),
                    radius: (self.width + (new_width - self.width) * t) / 2.0,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "InkPhysicsModel::advance: d={:.1} v={:.3} width {:.2} -> {:.2}, {} dabs",
            distance,
            velocity,
            self.width,
            new_width,
            dabs.len()
        );
        self.last_point = point;
        self.width = new_width;
        dabs
    }
}
