//! Surface lifecycle: layout, base content and clearing

use ab_glyph::FontArc;
use hongzhi_config::DisplayConfig;
use tracing::{debug, info};

use crate::constants::MAX_PIXEL_BUDGET;
use crate::descriptor::{BaseContent, CoupletPaper, PaperDescriptor};
use crate::sizing::compute_layout;
use crate::surface::{DirtyRegion, RasterSurface};

use super::{DrawSettings, DrawingSession, default_brush_size, history_capacity};

impl DrawingSession {
    /// The buffer, once a layout has been reported
    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    /// Region modified since the last call, for partial presentation
    pub fn take_dirty_region(&mut self) -> Option<DirtyRegion> {
        self.surface.as_mut().and_then(RasterSurface::take_dirty_region)
    }

    /// Fit the buffer to a new container layout.
    ///
    /// The buffer is only recreated (and the drawing lost) when its device
    /// size or pixel ratio changes; otherwise only the pointer mapping moves.
    /// Returns true if the buffer was recreated.
    pub fn resize(&mut self, display: DisplayConfig) -> bool {
        let budget = self.config.pixel_budget.min(MAX_PIXEL_BUDGET);
        let layout = compute_layout(&display, Some(self.base.aspect_ratio()), budget);
        self.display = Some(display);

        let unchanged = self.surface.as_ref().is_some_and(|surface| {
            surface.width == layout.width
                && surface.height == layout.height
                && surface.device_pixel_ratio() == layout.device_pixel_ratio
        });
        self.layout = Some(layout);
        if unchanged {
            debug!(
                "DrawingSession::resize: buffer unchanged, displayed at {:.1}x{:.1}",
                layout.displayed_width, layout.displayed_height
            );
            return false;
        }
        self.rebuild();
        true
    }

    /// Switch to a cut template. The drawing and history are discarded.
    pub fn set_template(&mut self, template: PaperDescriptor) {
        self.set_base(BaseContent::Template(template));
    }

    /// Switch to a couplet paper. The drawing and history are discarded.
    pub fn set_paper(&mut self, paper: CoupletPaper) {
        self.set_base(BaseContent::Couplet(paper));
    }

    pub fn set_base(&mut self, base: BaseContent) {
        let aspect_changed = base.aspect_ratio() != self.base.aspect_ratio();
        if base.mode() != self.base.mode() {
            self.settings.brush_size = default_brush_size(base.mode());
            self.settings.tool = DrawSettings::for_mode(base.mode()).tool;
        }
        self.history.set_capacity(history_capacity(&self.config, base.mode()));
        self.base = base;
        match self.display {
            // the buffer shape follows the paper
            Some(display) if aspect_changed => {
                self.surface = None;
                self.resize(display);
            }
            _ => self.rebuild(),
        }
    }

    /// Font used to render skeleton glyphs. Re-renders the base.
    pub fn set_font(&mut self, font: Option<FontArc>) {
        self.font = font;
        if matches!(self.base, BaseContent::Template(PaperDescriptor::Skeleton { .. })) {
            self.rebuild();
        }
    }

    /// Discard the drawing and re-render the base at the current size
    pub fn clear(&mut self) {
        if self.surface.is_none() {
            return;
        }
        info!("DrawingSession::clear");
        self.rebuild();
    }

    /// Recreate the buffer from the current layout and base content.
    /// Drops history, the gesture in progress and any pending prune.
    fn rebuild(&mut self) {
        self.cancel_pending_prune();
        self.stroke = None;
        self.history.clear();
        let Some(layout) = self.layout else {
            return;
        };
        let surface = self
            .surface
            .get_or_insert_with(|| RasterSurface::new(0, 0, layout.device_pixel_ratio));
        surface.set_device_pixel_ratio(layout.device_pixel_ratio);
        surface.initialize(layout.width, layout.height, &self.base, self.font.as_ref());
    }
}
