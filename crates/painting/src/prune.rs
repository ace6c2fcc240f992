//! Removal of paper scraps severed from the main sheet
//!
//! After a cut the sheet may fall apart into several 4-connected pieces of
//! occupied pixels. The largest piece is the body; every other piece drops
//! away and is cleared to transparent.

use tracing::{debug, info};

use crate::surface::{RasterSurface, TRANSPARENT};

const UNVISITED: u8 = 0;
const VISITED: u8 = 1;
const BODY: u8 = 2;

/// Outcome of one pruning pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneReport {
    /// Connected components found before pruning
    pub components: usize,
    /// Pixel count of the surviving component
    pub body_size: usize,
    /// Pixels cleared
    pub cleared: usize,
}

/// Iterative breadth-first labeling over flat pixel indices.
///
/// The queue and label arrays are kept between passes so a session reuses
/// one allocation per buffer size.
#[derive(Debug, Default)]
pub struct ConnectivityPruner {
    queue: Vec<u32>,
    labels: Vec<u8>,
}

impl ConnectivityPruner {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, pixel_count: usize) {
        self.labels.clear();
        self.labels.resize(pixel_count, UNVISITED);
        self.queue.clear();
    }

    /// Flood the component containing `seed` with `label`. Returns its size.
    fn flood(&mut self, pixels: &[[u8; 4]], width: usize, seed: usize, label: u8) -> usize {
        let height = pixels.len() / width;
        self.queue.clear();
        self.queue.push(seed as u32);
        self.labels[seed] = label;

        let mut head = 0;
        while head < self.queue.len() {
            let idx = self.queue[head] as usize;
            head += 1;
            let x = idx % width;
            let y = idx / width;

            let visit = |n: usize, labels: &mut [u8], queue: &mut Vec<u32>| {
                if labels[n] == UNVISITED && pixels[n] != TRANSPARENT {
                    labels[n] = label;
                    queue.push(n as u32);
                }
            };
            if x > 0 {
                visit(idx - 1, &mut self.labels, &mut self.queue);
            }
            if x + 1 < width {
                visit(idx + 1, &mut self.labels, &mut self.queue);
            }
            if y > 0 {
                visit(idx - width, &mut self.labels, &mut self.queue);
            }
            if y + 1 < height {
                visit(idx + width, &mut self.labels, &mut self.queue);
            }
        }
        self.queue.len()
    }

    /// Sizes and seeds of every component, in row-major order of their seeds
    fn label_components(&mut self, surface: &RasterSurface) -> Vec<(usize, usize)> {
        let pixels = surface.pixels();
        let width = surface.width as usize;
        self.reset(pixels.len());
        let mut components = Vec::new();
        if width == 0 {
            return components;
        }
        for seed in 0..pixels.len() {
            if self.labels[seed] == UNVISITED && pixels[seed] != TRANSPARENT {
                let size = self.flood(pixels, width, seed, VISITED);
                components.push((seed, size));
            }
        }
        components
    }

    /// Number of 4-connected components of occupied pixels
    #[cfg(test)]
    pub(crate) fn count_components(&mut self, surface: &RasterSurface) -> usize {
        self.label_components(surface).len()
    }

    /// Keep the largest component and clear every other occupied pixel.
    ///
    /// Ties go to the component whose first pixel comes first in row-major
    /// order. The surface is only written when something is cleared.
    pub fn prune(&mut self, surface: &mut RasterSurface) -> PruneReport {
        let components = self.label_components(surface);
        let mut report = PruneReport {
            components: components.len(),
            ..PruneReport::default()
        };
        let Some(&(body_seed, body_size)) = components
            .iter()
            .fold(None, |best: Option<&(usize, usize)>, c| match best {
                Some(b) if b.1 >= c.1 => Some(b),
                _ => Some(c),
            })
        else {
            return report;
        };
        report.body_size = body_size;
        if components.len() < 2 {
            return report;
        }

        let width = surface.width as usize;
        self.labels.fill(UNVISITED);
        self.flood(surface.pixels(), width, body_seed, BODY);

        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (idx, pixel) in surface.pixels_mut().iter_mut().enumerate() {
            if *pixel != TRANSPARENT && self.labels[idx] != BODY {
                *pixel = TRANSPARENT;
                report.cleared += 1;
                let (x, y) = (idx % width, idx / width);
                bounds = Some(match bounds {
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    None => (x, y, x, y),
                });
            }
        }
        if let Some((x0, y0, x1, y1)) = bounds {
            surface.mark_region_dirty(x0 as u32, y0 as u32, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        }

        info!(
            "ConnectivityPruner: {} components, kept {} px, cleared {} px",
            report.components, report.body_size, report.cleared
        );
        debug!("ConnectivityPruner: queue capacity {}", self.queue.capacity());
        report
    }
}
