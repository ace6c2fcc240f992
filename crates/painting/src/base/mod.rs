//! Base content rendering
//!
//! Re-rendered from scratch whenever the buffer is (re)created or cleared:
//! the cut-mode paper sheet with its fiber texture, or the couplet paper with
//! gradient, noise and guides.

mod couplet;
mod noise;
mod paper;

use ab_glyph::FontArc;
use tracing::info;

use crate::descriptor::BaseContent;
use crate::surface::{RasterSurface, TRANSPARENT};

impl RasterSurface {
    /// Size the buffer and render base content.
    ///
    /// Storage is only replaced when the dimensions differ, but the pixels are
    /// always cleared and redrawn. Returns true if storage was replaced.
    pub fn initialize(&mut self, width: u32, height: u32, base: &BaseContent, font: Option<&FontArc>) -> bool {
        let reallocated = self.reallocate(width.max(1), height.max(1));
        self.clear(TRANSPARENT);
        match base {
            BaseContent::Template(descriptor) => paper::render(self, descriptor, font),
            BaseContent::Couplet(couplet) => couplet::render(self, couplet),
        }
        info!(
            "RasterSurface::initialize: {}x{} ({:?} base, reallocated: {})",
            self.width,
            self.height,
            base.mode(),
            reallocated
        );
        reallocated
    }
}
