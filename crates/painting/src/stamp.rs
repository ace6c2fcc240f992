//! Stamp placement through the symmetry group

use kurbo::{Affine, Point, Vec2};
use tracing::debug;

use crate::constants::{DESCRIPTOR_EXTENT, STAMP_BRUSH_REFERENCE, STAMP_BUFFER_REFERENCE};
use crate::descriptor::StampShape;
use crate::surface::RasterSurface;
use crate::symmetry::SymmetryCompositor;
use crate::types::{Composite, FillRule};

/// Cuts a stamp shape out of the paper at every symmetric placement
#[derive(Debug, Clone, Copy, Default)]
pub struct StampCompositor {
    symmetry: SymmetryCompositor,
}

impl StampCompositor {
    pub fn new(symmetry: SymmetryCompositor) -> Self {
        Self { symmetry }
    }

    /// Uniform scale from the 0-100 stamp frame to buffer pixels
    pub fn stamp_scale(brush_size: f64, buffer_width: u32) -> f64 {
        (brush_size / STAMP_BRUSH_REFERENCE) * (buffer_width as f64 / STAMP_BUFFER_REFERENCE)
    }

    /// Placement of the stamp inside the centered strategy frame
    pub fn local_transform(offset: Vec2, scale: f64) -> Affine {
        let half = DESCRIPTOR_EXTENT / 2.0;
        Affine::translate(offset) * Affine::scale(scale) * Affine::translate((-half, -half))
    }

    /// Stamp `shape` centered on `point` (buffer pixels). Returns the number of
    /// pixels erased.
    pub fn apply(&self, surface: &mut RasterSurface, shape: &StampShape, point: Point, brush_size: f64) -> usize {
        let center = Point::new(surface.width as f64 / 2.0, surface.height as f64 / 2.0);
        let scale = Self::stamp_scale(brush_size, surface.width);
        let local = Self::local_transform(point - center, scale);
        let erased = self.symmetry.apply(surface, Composite::Erase, |painter| {
            painter.fill_path(shape.path(), local, FillRule::EvenOdd);
        });
        debug!(
            "StampCompositor::apply: at ({:.1}, {:.1}) scale {:.3}, {} px erased",
            point.x, point.y, scale, erased
        );
        erased
    }
}
