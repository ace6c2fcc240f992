//! Main IPC message enums and line codec.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::input::PointerEvent;
use crate::types::{ControlCounters, LayoutInfo, PaperSpec, SettingsUpdate, TemplateSpec};

/// Messages from the host to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToEngine {
    /// Container layout or device pixel ratio changed
    Layout(LayoutInfo),

    /// Pointer pressed on the drawing element
    PointerDown(PointerEvent),

    /// Pointer moved while pressed
    PointerMove(PointerEvent),

    /// Pointer released or left the element
    PointerUp(PointerEvent),

    /// Drawing settings changed
    Settings(SettingsUpdate),

    /// Switch to a cut-mode template
    Template(TemplateSpec),

    /// Switch to a write-mode couplet paper
    Paper(PaperSpec),

    /// Clear/undo button counters
    Controls(ControlCounters),
}

/// Messages from the engine to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToHost {
    /// A deferred connectivity pass started or finished
    ProcessingChanged { processing: bool },

    /// The buffer was recreated at a new size
    BufferResized { width: u32, height: u32 },

    /// Pixels inside this rectangle changed since the last report
    Damaged { x: u32, y: u32, width: u32, height: u32 },

    /// A message could not be applied
    Error { message: String },
}

/// Decode one line of input. Blank lines are rejected.
pub fn decode_line(line: &str) -> Result<HostToEngine, IpcError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(IpcError::InvalidFormat("empty line".to_string()));
    }
    serde_json::from_str(line).map_err(IpcError::Decode)
}

/// Encode a message as one line, without the trailing newline
pub fn encode_line(message: &EngineToHost) -> Result<String, IpcError> {
    serde_json::to_string(message).map_err(IpcError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InkColorKind, ShapeKind, ToolKind};

    #[test]
    fn test_decode_pointer_events() {
        let message = decode_line(r#"{"type":"PointerDown","data":{"x":12.5,"y":40}}"#).unwrap();
        assert_eq!(message, HostToEngine::PointerDown(PointerEvent { x: 12.5, y: 40.0 }));
    }

    #[test]
    fn test_layout_scale_defaults_to_one() {
        let message = decode_line(r#"{"type":"Layout","data":{"width":400,"height":300}}"#).unwrap();
        let HostToEngine::Layout(layout) = message else {
            panic!("expected layout, got {:?}", message);
        };
        assert_eq!(layout.scale, 1.0);
    }

    #[test]
    fn test_decode_settings_with_defaults() {
        let message = decode_line(r#"{"type":"Settings","data":{"symmetry":8,"brush_size":8}}"#).unwrap();
        let HostToEngine::Settings(settings) = message else {
            panic!("expected settings, got {:?}", message);
        };
        assert_eq!(settings.tool, ToolKind::CutBrush);
        assert_eq!(settings.ink_color, InkColorKind::Black);
        assert!(settings.stamp_path.is_none());

        let message = decode_line(
            r#"{"type":"Settings","data":{"symmetry":4,"brush_size":12,"tool":"ink_brush","ink_color":"gold"}}"#,
        )
        .unwrap();
        let HostToEngine::Settings(settings) = message else {
            panic!("expected settings, got {:?}", message);
        };
        assert_eq!(settings.tool, ToolKind::InkBrush);
        assert_eq!(settings.ink_color, InkColorKind::Gold);
    }

    #[test]
    fn test_decode_templates() {
        let message = decode_line(r#"{"type":"Template","data":{"kind":"solid","shape":"octagon"}}"#).unwrap();
        assert_eq!(
            message,
            HostToEngine::Template(TemplateSpec::Solid { shape: ShapeKind::Octagon })
        );

        let message = decode_line(r#"{"type":"Template","data":{"kind":"skeleton","glyph":"福"}}"#).unwrap();
        assert_eq!(
            message,
            HostToEngine::Template(TemplateSpec::Skeleton {
                glyph: '福',
                extra_path: None
            })
        );
    }

    #[test]
    fn test_controls_missing_counter_is_zero() {
        let message = decode_line(r#"{"type":"Controls","data":{"undo_counter":2}}"#).unwrap();
        assert_eq!(
            message,
            HostToEngine::Controls(ControlCounters {
                clear_counter: 0,
                undo_counter: 2
            })
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(decode_line("   "), Err(IpcError::InvalidFormat(_))));
        assert!(matches!(decode_line("{\"type\":\"Nope\"}"), Err(IpcError::Decode(_))));
        assert!(decode_line(r#"{"type":"Template","data":{"kind":"solid","shape":"hexagon"}}"#).is_err());
    }

    #[test]
    fn test_malformed_line_reports_a_decode_error() {
        let err = decode_line(r#"{"type":"PointerDown","data":{"x":1"#).unwrap_err();
        assert!(matches!(err, IpcError::Decode(_)));
        let message = err.to_string();
        assert!(message.starts_with("Malformed host command: "), "{message}");
        assert!(!message.contains("serialize"));
    }

    #[test]
    fn test_encode_outputs() {
        let line = encode_line(&EngineToHost::ProcessingChanged { processing: true }).unwrap();
        assert_eq!(line, r#"{"type":"ProcessingChanged","data":{"processing":true}}"#);
        let line = encode_line(&EngineToHost::BufferResized { width: 800, height: 200 }).unwrap();
        assert_eq!(line, r#"{"type":"BufferResized","data":{"width":800,"height":200}}"#);
        let line = encode_line(&EngineToHost::Damaged {
            x: 4,
            y: 8,
            width: 16,
            height: 2,
        })
        .unwrap();
        assert_eq!(line, r#"{"type":"Damaged","data":{"x":4,"y":8,"width":16,"height":2}}"#);
    }
}
