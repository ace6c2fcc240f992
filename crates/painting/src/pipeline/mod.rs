//! Drawing session
//!
//! This module ties the engine together for one drawing surface:
//! - Layout and base content (surface creation and re-rendering)
//! - Gestures (cut brush, stamp and ink brush)
//! - Snapshot history and undo
//! - The deferred connectivity pass after each cut gesture
//!
//! Input is serialized by the host. Every call runs to completion on the
//! caller's thread; the only deferred work is the pending prune, which the
//! host drives through [`DrawingSession::poll`].

mod gesture;
mod schedule;
mod surface_ops;
mod undo;

use ab_glyph::FontArc;
use hongzhi_config::{DisplayConfig, EngineConfig};
use kurbo::Point;
use tracing::debug;

use crate::descriptor::{BaseContent, CoupletPaper, PaperDescriptor, StampShape};
use crate::history::HistoryStack;
use crate::prune::ConnectivityPruner;
use crate::sizing::SurfaceLayout;
use crate::surface::RasterSurface;
use crate::types::{DrawMode, InkColor, SymmetryMode, Tool};

pub use gesture::StrokeState;

/// Brush size a cut session opens with, in logical pixels
pub const DEFAULT_BRUSH_SIZE: f64 = 8.0;

/// Brush size a calligraphy session opens with
pub const DEFAULT_INK_BRUSH_SIZE: f64 = 12.0;

/// Opening brush size for a drawing mode
pub fn default_brush_size(mode: DrawMode) -> f64 {
    match mode {
        DrawMode::Cut => DEFAULT_BRUSH_SIZE,
        DrawMode::Write => DEFAULT_INK_BRUSH_SIZE,
    }
}

/// Drawing settings owned by the host's controls, read at every gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSettings {
    pub symmetry: SymmetryMode,
    /// Nominal brush size in logical pixels
    pub brush_size: f64,
    pub tool: Tool,
    pub stamp: Option<StampShape>,
    pub ink_color: InkColor,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            symmetry: SymmetryMode::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            tool: Tool::default(),
            stamp: None,
            ink_color: InkColor::default(),
        }
    }
}

impl DrawSettings {
    /// Settings a session in `mode` opens with
    pub fn for_mode(mode: DrawMode) -> Self {
        let tool = match mode {
            DrawMode::Cut => Tool::CutBrush,
            DrawMode::Write => Tool::InkBrush,
        };
        Self {
            brush_size: default_brush_size(mode),
            tool,
            ..Self::default()
        }
    }
}

/// Edge-triggered request counters from the host's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub clear_counter: u64,
    pub undo_counter: u64,
}

/// One drawing surface with its history, gesture state and pending prune
pub struct DrawingSession {
    pub(crate) config: EngineConfig,
    pub(crate) base: BaseContent,
    pub(crate) font: Option<FontArc>,
    /// Container the surface was last laid out in
    pub(crate) display: Option<DisplayConfig>,
    pub(crate) layout: Option<SurfaceLayout>,
    /// None until the host reports a layout
    pub(crate) surface: Option<RasterSurface>,
    pub(crate) history: HistoryStack,
    pub(crate) settings: DrawSettings,
    pub(crate) controls: ControlState,
    /// Transient per-gesture state
    pub(crate) stroke: Option<StrokeState>,
    pub(crate) pruner: ConnectivityPruner,
    /// Deadline (host clock, ms) of the pending connectivity pass
    pub(crate) pending_prune: Option<f64>,
}

impl DrawingSession {
    /// Session over the given base content
    pub fn new(base: BaseContent, config: EngineConfig) -> Self {
        let capacity = history_capacity(&config, base.mode());
        let settings = DrawSettings::for_mode(base.mode());
        Self {
            config,
            base,
            font: None,
            display: None,
            layout: None,
            surface: None,
            history: HistoryStack::new(capacity),
            settings,
            controls: ControlState::default(),
            stroke: None,
            pruner: ConnectivityPruner::new(),
            pending_prune: None,
        }
    }

    /// Paper-cutting session over a template
    pub fn cut(template: PaperDescriptor, config: EngineConfig) -> Self {
        Self::new(BaseContent::Template(template), config)
    }

    /// Calligraphy session over a couplet paper
    pub fn write(paper: CoupletPaper, config: EngineConfig) -> Self {
        Self::new(BaseContent::Couplet(paper), config)
    }

    pub fn mode(&self) -> DrawMode {
        self.base.mode()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn base(&self) -> &BaseContent {
        &self.base
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Replace the drawing settings. Takes effect from the next gesture or
    /// segment.
    pub fn set_settings(&mut self, settings: DrawSettings) {
        debug!(
            "DrawingSession::set_settings: {:?} x{} brush {} {:?}",
            settings.tool,
            settings.symmetry.placements(),
            settings.brush_size,
            settings.ink_color
        );
        self.settings = settings;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Current layout, once the host has reported one
    pub fn layout(&self) -> Option<&SurfaceLayout> {
        self.layout.as_ref()
    }

    /// Map an element-relative pointer position into buffer pixels
    pub fn map_pointer(&self, x: f64, y: f64) -> Option<Point> {
        self.layout.map(|layout| layout.pointer_mapping().map(x, y))
    }

    /// Apply the host's request counters. Any increase of a counter is one
    /// action; a decrease only resynchronizes.
    pub fn apply_controls(&mut self, controls: ControlState) {
        let previous = self.controls;
        self.controls = controls;
        if controls.clear_counter > previous.clear_counter {
            self.clear();
        }
        if controls.undo_counter > previous.undo_counter {
            self.undo();
        }
    }
}

fn history_capacity(config: &EngineConfig, mode: DrawMode) -> usize {
    match mode {
        DrawMode::Cut => config.cut.history_capacity,
        DrawMode::Write => config.ink.history_capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CoupletFormat, PaperShape, PaperTexture};
    use crate::surface::TRANSPARENT;
    use crate::types::StrokePoint;

    pub(super) fn cut_session(size: f32) -> DrawingSession {
        let mut session = DrawingSession::cut(PaperDescriptor::solid(PaperShape::Square), EngineConfig::default());
        session.resize(DisplayConfig::new(size, size));
        session
    }

    pub(super) fn write_session() -> DrawingSession {
        let paper = CoupletPaper::new("horizontal", CoupletFormat::Horizontal, 3.5, PaperTexture::Plain);
        let mut session = DrawingSession::write(paper, EngineConfig::default());
        session.resize(DisplayConfig::new(350.0, 350.0));
        session
    }

    pub(super) fn drag(session: &mut DrawingSession, points: &[(f64, f64)], start_ms: f64) -> f64 {
        let mut t = start_ms;
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            session.pointer_down(StrokePoint::new(x, y, t));
        }
        for &(x, y) in iter {
            t += 16.0;
            session.pointer_move(StrokePoint::new(x, y, t));
        }
        let last = points.last().copied().unwrap_or_default();
        session.pointer_up(StrokePoint::new(last.0, last.1, t));
        t
    }

    #[test]
    fn test_brush_defaults_follow_mode() {
        let cut = cut_session(100.0);
        assert_eq!(cut.settings().brush_size, 8.0);
        assert_eq!(cut.settings().tool, Tool::CutBrush);
        let write = write_session();
        assert_eq!(write.settings().brush_size, 12.0);
        assert_eq!(write.settings().tool, Tool::InkBrush);
    }

    #[test]
    fn test_history_capacity_follows_mode() {
        let cut = DrawingSession::cut(PaperDescriptor::default(), EngineConfig::default());
        assert_eq!(cut.history.capacity(), 20);
        assert_eq!(cut.mode(), DrawMode::Cut);
        let write = write_session();
        assert_eq!(write.history.capacity(), 10);
    }

    #[test]
    fn test_drawing_without_surface_is_noop() {
        let mut session = DrawingSession::cut(PaperDescriptor::default(), EngineConfig::default());
        session.pointer_down(StrokePoint::new(1.0, 1.0, 0.0));
        session.pointer_move(StrokePoint::new(20.0, 1.0, 16.0));
        session.pointer_up(StrokePoint::new(20.0, 1.0, 16.0));
        session.undo();
        session.clear();
        assert!(session.surface().is_none());
        assert!(!session.is_processing());
        assert_eq!(session.history_len(), 0);
        assert!(session.map_pointer(1.0, 1.0).is_none());
    }

    #[test]
    fn test_controls_are_edge_triggered() {
        let mut session = cut_session(100.0);
        drag(&mut session, &[(20.0, 50.0), (40.0, 50.0), (60.0, 50.0), (80.0, 50.0)], 0.0);
        drag(&mut session, &[(50.0, 20.0), (50.0, 40.0), (50.0, 60.0)], 100.0);
        assert_eq!(session.history_len(), 2);

        // jump of several counts is still one undo
        session.apply_controls(ControlState { clear_counter: 0, undo_counter: 3 });
        assert_eq!(session.history_len(), 1);

        // unchanged counters do nothing
        session.apply_controls(ControlState { clear_counter: 0, undo_counter: 3 });
        assert_eq!(session.history_len(), 1);

        // a decrease only resyncs
        session.apply_controls(ControlState { clear_counter: 0, undo_counter: 1 });
        assert_eq!(session.history_len(), 1);

        session.apply_controls(ControlState { clear_counter: 1, undo_counter: 1 });
        assert_eq!(session.history_len(), 0);
        let surface = session.surface().unwrap();
        assert_ne!(surface.get_pixel(50, 50), Some(TRANSPARENT));
    }

    #[test]
    fn test_map_pointer_uses_layout() {
        let mut session = DrawingSession::cut(PaperDescriptor::default(), EngineConfig::default());
        session.resize(DisplayConfig::new(300.0, 200.0).with_scale(2.0));
        let p = session.map_pointer(100.0, 50.0).unwrap();
        assert_eq!((p.x, p.y), (200.0, 100.0));
    }
}
