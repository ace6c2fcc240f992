//! Pointer gestures: cut strokes, stamps and ink strokes

use kurbo::{Affine, Point, QuadBez};
use tracing::{debug, warn};

use crate::ink::{InkDab, InkPhysicsModel};
use crate::raster::Painter;
use crate::smoothing::StrokeSmoother;
use crate::stamp::StampCompositor;
use crate::surface::RasterSurface;
use crate::symmetry::SymmetryCompositor;
use crate::types::{Composite, DrawMode, StrokePoint, Tool};

use super::DrawingSession;

/// State of the gesture in progress. Created on pointer-down and dropped on
/// pointer-up.
#[derive(Debug, Clone)]
pub enum StrokeState {
    /// Cut brush: smoothed segments replicated through the symmetry group
    Cut(StrokeSmoother),
    /// Ink brush: velocity-modulated dabs
    Ink(InkPhysicsModel),
}

/// Stroke width in device pixels for a brush size in logical pixels
fn brush_px(brush_size: f64, surface: &RasterSurface) -> f64 {
    brush_size * surface.device_pixel_ratio() as f64
}

impl DrawingSession {
    /// Whether a gesture is in progress
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Begin a gesture at `point` (buffer pixels)
    pub fn pointer_down(&mut self, point: StrokePoint) {
        if self.surface.is_none() {
            return;
        }
        if self.stroke.take().is_some() {
            debug!("pointer_down: previous gesture never ended, dropping it");
        }
        // the pre-gesture snapshot must be a pruned state
        self.flush_pending_prune();

        match (self.mode(), self.settings.tool) {
            (DrawMode::Cut, Tool::Stamp) => self.place_stamp(point),
            (DrawMode::Cut, _) => self.begin_cut(point),
            (DrawMode::Write, _) => self.begin_ink(point),
        }
    }

    /// Continue the gesture in progress
    pub fn pointer_move(&mut self, point: StrokePoint) {
        let (Some(surface), Some(stroke)) = (self.surface.as_mut(), self.stroke.as_mut()) else {
            return;
        };
        let brush_px = brush_px(self.settings.brush_size, surface);
        match stroke {
            StrokeState::Cut(smoother) => {
                if let Some(segment) = smoother.accept(point.point()) {
                    let compositor = SymmetryCompositor::new(self.settings.symmetry);
                    paint_cut_segment(surface, &compositor, segment, brush_px);
                }
            }
            StrokeState::Ink(model) => {
                let dabs = model.advance(point);
                paint_ink(surface, &dabs, Composite::Over(self.settings.ink_color.rgba()));
            }
        }
    }

    /// End the gesture in progress. A finished cut stroke schedules the
    /// connectivity pass.
    pub fn pointer_up(&mut self, point: StrokePoint) {
        match self.stroke.take() {
            Some(StrokeState::Cut(smoother)) => {
                debug!("pointer_up: cut stroke of {} samples", smoother.accepted());
                self.schedule_prune(point.time_ms);
            }
            Some(StrokeState::Ink(model)) => {
                debug!("pointer_up: ink stroke ended at width {:.2}", model.width());
            }
            None => {}
        }
    }

    fn begin_cut(&mut self, point: StrokePoint) {
        self.push_snapshot();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let dot_radius = brush_px(self.settings.brush_size, surface) * self.config.cut.dot_radius_ratio;
        let center = surface_center(surface);
        let rel = point.point() - center.to_vec2();
        SymmetryCompositor::new(self.settings.symmetry).apply(surface, Composite::Erase, |painter| {
            painter.fill_circle(rel, dot_radius);
        });
        self.stroke = Some(StrokeState::Cut(StrokeSmoother::new(
            point.point(),
            self.config.cut.min_draw_distance,
        )));
    }

    fn place_stamp(&mut self, point: StrokePoint) {
        let Some(shape) = self.settings.stamp.clone() else {
            warn!("pointer_down: stamp tool active without a stamp, ignoring");
            return;
        };
        self.push_snapshot();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let brush_size = self.settings.brush_size;
        StampCompositor::new(SymmetryCompositor::new(self.settings.symmetry)).apply(
            surface,
            &shape,
            point.point(),
            brush_size,
        );
        self.schedule_prune(point.time_ms);
    }

    fn begin_ink(&mut self, point: StrokePoint) {
        self.push_snapshot();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let brush_px = brush_px(self.settings.brush_size, surface);
        let (model, dab) = InkPhysicsModel::begin(point, brush_px, &self.config.ink);
        paint_ink(surface, &[dab], Composite::Over(self.settings.ink_color.rgba()));
        self.stroke = Some(StrokeState::Ink(model));
    }
}

fn surface_center(surface: &RasterSurface) -> Point {
    Point::new(surface.width as f64 / 2.0, surface.height as f64 / 2.0)
}

/// Paint one smoothed segment, moved into the center-relative frame
fn paint_cut_segment(surface: &mut RasterSurface, compositor: &SymmetryCompositor, segment: QuadBez, width: f64) {
    let local = Affine::translate(-surface_center(surface).to_vec2()) * segment;
    compositor.apply(surface, Composite::Erase, |painter| {
        painter.stroke_quad(local, width);
    });
}

/// Each dab is its own fill, so overlapping dabs build up ink
fn paint_ink(surface: &mut RasterSurface, dabs: &[InkDab], composite: Composite) {
    for dab in dabs {
        Painter::new(&mut *surface, Affine::IDENTITY, composite).fill_circle(dab.center, dab.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{cut_session, drag, write_session};
    use super::*;
    use crate::descriptor::StampShape;
    use crate::pipeline::DrawSettings;
    use crate::surface::TRANSPARENT;
    use crate::symmetry::tests::assert_group_invariant;
    use crate::types::{InkColor, SymmetryMode};

    fn settings(symmetry: SymmetryMode, tool: Tool) -> DrawSettings {
        DrawSettings {
            symmetry,
            tool,
            ..DrawSettings::default()
        }
    }

    #[test]
    fn test_cut_stroke_erases_and_snapshots() {
        let mut session = cut_session(100.0);
        session.set_settings(settings(SymmetryMode::One, Tool::CutBrush));
        drag(&mut session, &[(30.0, 50.0), (40.0, 50.0), (50.0, 50.0), (60.0, 50.0)], 0.0);
        assert_eq!(session.history_len(), 1);
        let surface = session.surface().unwrap();
        // dot at the start, segment around the middle sample
        assert_eq!(surface.get_pixel(30, 50), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(45, 50), Some(TRANSPARENT));
        assert_ne!(surface.get_pixel(50, 20), Some(TRANSPARENT));
        assert!(session.is_processing());
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_cut_stroke_is_symmetric() {
        for mode in SymmetryMode::ALL {
            let mut session = cut_session(120.0);
            session.set_settings(settings(mode, Tool::CutBrush));
            let before = session.surface().unwrap().snapshot();
            drag(&mut session, &[(70.0, 40.0), (80.0, 45.0), (85.0, 55.0), (80.0, 65.0)], 0.0);
            let surface = session.surface().unwrap();
            assert_group_invariant(&before, surface, mode);
        }
    }

    #[test]
    fn test_stamp_without_selection_does_nothing() {
        let mut session = cut_session(100.0);
        session.set_settings(settings(SymmetryMode::Four, Tool::Stamp));
        let before = session.surface().unwrap().snapshot();
        drag(&mut session, &[(50.0, 50.0)], 0.0);
        assert_eq!(session.history_len(), 0);
        assert!(!session.is_processing());
        assert_eq!(session.surface().unwrap().snapshot(), before);
    }

    #[test]
    fn test_stamp_places_and_schedules_prune() {
        let mut session = cut_session(100.0);
        let mut stamp_settings = settings(SymmetryMode::Four, Tool::Stamp);
        stamp_settings.stamp = Some(StampShape::from_svg("M50 5 L85 50 L50 95 L15 50 Z").unwrap());
        session.set_settings(stamp_settings);
        session.pointer_down(StrokePoint::new(50.0, 50.0, 5.0));
        assert_eq!(session.history_len(), 1);
        assert!(session.is_processing());
        assert!(!session.is_drawing());
        assert_eq!(session.next_deadline(), Some(15.0));
        assert_eq!(session.surface().unwrap().get_pixel(50, 50), Some(TRANSPARENT));
    }

    #[test]
    fn test_ink_stroke_deposits_color() {
        let mut session = write_session();
        let mut ink = settings(SymmetryMode::One, Tool::InkBrush);
        ink.ink_color = InkColor::Gold;
        ink.brush_size = 12.0;
        session.set_settings(ink);
        let before = session.surface().unwrap().get_pixel(60, 50).unwrap();
        drag(&mut session, &[(50.0, 50.0), (60.0, 50.0), (70.0, 50.0)], 0.0);
        let after = session.surface().unwrap().get_pixel(60, 50).unwrap();
        assert_ne!(before, after);
        // gold raises the green channel of red paper
        assert!(after[1] > before[1]);
        assert_eq!(after[3], 255);
        // calligraphy never prunes
        assert!(!session.is_processing());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let mut session = cut_session(100.0);
        let before = session.surface().unwrap().snapshot();
        session.pointer_move(StrokePoint::new(10.0, 10.0, 0.0));
        session.pointer_up(StrokePoint::new(10.0, 10.0, 0.0));
        assert_eq!(session.surface().unwrap().snapshot(), before);
        assert!(!session.is_processing());
    }
}
