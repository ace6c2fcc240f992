//! Radial symmetry compositor
//!
//! A paint action is written once, as a strategy drawing in a frame whose
//! origin is the buffer center. The compositor enumerates the dihedral
//! placements of the active mode and runs the strategy once per placement.

use std::f64::consts::TAU;

use kurbo::{Affine, Point};
use tracing::debug;

use crate::raster::Painter;
use crate::surface::RasterSurface;
use crate::types::{Composite, SymmetryMode};

/// Placement transforms for `mode` about `center`.
///
/// For sector `i` the rotation is `i * 2pi / sectors`; every mode except
/// `One` follows each rotation with the same rotation applied to a
/// horizontally mirrored frame.
pub fn dihedral_transforms(mode: SymmetryMode, center: Point) -> Vec<Affine> {
    let sectors = mode.sectors();
    let step = TAU / sectors as f64;
    let to_center = Affine::translate(center.to_vec2());
    let mut transforms = Vec::with_capacity(mode.placements() as usize);
    for i in 0..sectors {
        let rotated = to_center * Affine::rotate(i as f64 * step);
        transforms.push(rotated);
        if mode.is_mirrored() {
            transforms.push(rotated * Affine::scale_non_uniform(-1.0, 1.0));
        }
    }
    transforms
}

/// Replicates paint actions across the symmetry group of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymmetryCompositor {
    mode: SymmetryMode,
}

impl SymmetryCompositor {
    pub fn new(mode: SymmetryMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SymmetryMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SymmetryMode) {
        self.mode = mode;
    }

    /// Run `strategy` once per placement. The strategy draws relative to the
    /// buffer center. Returns the number of pixels changed.
    pub fn apply<F>(&self, surface: &mut RasterSurface, composite: Composite, mut strategy: F) -> usize
    where
        F: FnMut(&mut Painter<'_>),
    {
        let center = Point::new(surface.width as f64 / 2.0, surface.height as f64 / 2.0);
        let mut changed = 0;
        for transform in dihedral_transforms(self.mode, center) {
            let mut painter = Painter::new(&mut *surface, transform, composite);
            strategy(&mut painter);
            changed += painter.changed();
        }
        debug!(
            "SymmetryCompositor::apply: {} placements, {} px changed",
            self.mode.placements(),
            changed
        );
        changed
    }
}
