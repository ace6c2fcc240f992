//! Pointer input events.

use serde::{Deserialize, Serialize};

/// A pointer position relative to the drawing element's top-left corner, in
/// logical pixels. The engine maps it into buffer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}
