//! IPC message protocol for Hongzhi
//!
//! Defines the messages exchanged between a host UI and the drawing engine.
//! Messages travel as one JSON object per line.

mod error;
mod input;
mod messages;
mod types;

pub use error::IpcError;
pub use input::PointerEvent;
pub use messages::{EngineToHost, HostToEngine, decode_line, encode_line};
pub use types::{
    ControlCounters, CoupletFormatKind, InkColorKind, LayoutInfo, PaperSpec, PaperTextureKind,
    SettingsUpdate, ShapeKind, TemplateSpec, ToolKind,
};
