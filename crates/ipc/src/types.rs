//! Settings, template and paper payloads.
//!
//! These mirror the engine's own types in wire form so that a host does not
//! need to link the engine to speak the protocol.

use serde::{Deserialize, Serialize};

/// Container layout reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    /// Container size in logical pixels
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    CutBrush,
    Stamp,
    InkBrush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkColorKind {
    #[default]
    Black,
    Gold,
}

/// Drawing settings from the host's controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// Placements per action: 1, 2, 4, 8 or 12
    pub symmetry: u8,
    /// Brush size in logical pixels
    pub brush_size: f64,
    #[serde(default)]
    pub tool: ToolKind,
    /// Stamp outline as SVG path data in a 0-100 box
    #[serde(default)]
    pub stamp_path: Option<String>,
    #[serde(default)]
    pub ink_color: InkColorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Diamond,
    Octagon,
}

/// Cut-mode template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateSpec {
    Solid {
        shape: ShapeKind,
    },
    Silhouette {
        path: String,
    },
    Skeleton {
        glyph: char,
        #[serde(default)]
        extra_path: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoupletFormatKind {
    Vertical,
    Horizontal,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperTextureKind {
    #[default]
    Plain,
    Speckled,
    Clouds,
    Dragon,
}

/// Write-mode couplet paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSpec {
    pub id: String,
    pub format: CoupletFormatKind,
    /// Width over height
    pub ratio: f64,
    #[serde(default)]
    pub texture: PaperTextureKind,
}

/// Monotonic request counters; each increment is one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlCounters {
    #[serde(default)]
    pub clear_counter: u64,
    #[serde(default)]
    pub undo_counter: u64,
}
