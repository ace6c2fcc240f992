//! Buffer sizing and pointer mapping
//!
//! The buffer is always sized from scratch from the container layout, the
//! device pixel ratio and the aspect ratio mandated by the active paper.

use hongzhi_config::DisplayConfig;
use kurbo::Point;
use tracing::debug;

/// Result of fitting a buffer into a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Buffer size in device pixels
    pub width: u32,
    pub height: u32,
    /// Size the buffer is displayed at, in logical pixels
    pub displayed_width: f64,
    pub displayed_height: f64,
    pub device_pixel_ratio: f32,
}

impl SurfaceLayout {
    /// Mapping from element-relative logical coordinates to buffer pixels
    pub fn pointer_mapping(&self) -> PointerMapping {
        PointerMapping::new(
            self.width,
            self.height,
            self.displayed_width,
            self.displayed_height,
        )
    }
}

/// Fit a buffer into the container.
///
/// `aspect` is width / height when the paper mandates one. When the device
/// pixel count would exceed `budget`, both dimensions shrink by
/// `sqrt(budget / requested)`.
pub fn compute_layout(display: &DisplayConfig, aspect: Option<f64>, budget: u64) -> SurfaceLayout {
    let dpr = display.device_pixel_ratio();
    let container_w = sanitize(display.width as f64);
    let container_h = sanitize(display.height as f64);

    let (mut logical_w, mut logical_h) = match aspect {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 && container_h > 0.0 => {
            if ratio > container_w / container_h {
                (container_w, container_w / ratio)
            } else {
                (container_h * ratio, container_h)
            }
        }
        _ => (container_w, container_h),
    };

    // the element keeps its fitted size; only the backing store shrinks
    let (displayed_width, displayed_height) = (logical_w, logical_h);
    let requested = logical_w * dpr as f64 * logical_h * dpr as f64;
    let budget = budget.max(1) as f64;
    if requested > budget {
        let scale = (budget / requested).sqrt();
        debug!(
            "compute_layout: {:.0} px over budget {:.0}, scaling by {:.4}",
            requested, budget, scale
        );
        logical_w *= scale;
        logical_h *= scale;
    }

    let width = ((logical_w * dpr as f64).floor() as u32).max(1);
    let height = ((logical_h * dpr as f64).floor() as u32).max(1);

    SurfaceLayout {
        width,
        height,
        displayed_width,
        displayed_height,
        device_pixel_ratio: dpr,
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Maps element-relative pointer coordinates into buffer pixel space.
///
/// The ratio `buffer_pixels / displayed_size` absorbs both the device pixel
/// ratio and any extra layout scaling applied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapping {
    scale_x: f64,
    scale_y: f64,
}

impl PointerMapping {
    pub fn new(buffer_width: u32, buffer_height: u32, displayed_width: f64, displayed_height: f64) -> Self {
        let ratio = |buffer: u32, displayed: f64| {
            if displayed.is_finite() && displayed > 0.0 {
                buffer as f64 / displayed
            } else {
                1.0
            }
        };
        Self {
            scale_x: ratio(buffer_width, displayed_width),
            scale_y: ratio(buffer_height, displayed_height),
        }
    }

    /// Convert an element-relative position to buffer pixels
    #[inline]
    pub fn map(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale_x, y * self.scale_y)
    }
}
