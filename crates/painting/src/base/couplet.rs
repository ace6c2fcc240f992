//! Couplet paper: gradient, grain, gold specks, guides and the dragon border

use kurbo::{Affine, BezPath, CircleSegment, Point, Rect, Shape};
use tracing::debug;

use super::noise::TextureRng;
use crate::constants::{COUPLET_GRADIENT_END, COUPLET_GRADIENT_START, GOLD, TEXTURE_SEED};
use crate::descriptor::{CoupletPaper, PaperTexture};
use crate::raster::Painter;
use crate::surface::RasterSurface;
use crate::types::{Composite, FillRule};

/// Peak-to-peak grain added to each channel
const GRAIN: f64 = 15.0;
/// Fraction of pixels replaced by gold specks on speckled paper
const SPECK_DENSITY: f64 = 0.005;
const SPECK: [u8; 4] = [GOLD[0], GOLD[1], GOLD[2], 200];

const GUIDE_DIAMETER: f64 = 0.85;
const GUIDE_LINE: f64 = 2.0;
const GUIDE_WHITE: [u8; 4] = [255, 255, 255, 38];
const GUIDE_GOLD: [u8; 4] = [GOLD[0], GOLD[1], GOLD[2], 51];
const CLOUD_FILL: [u8; 4] = [0, 0, 0, 5];
const CLOUD_INSET: f64 = 4.0;

const SCALE_RADIUS: f64 = 24.0;
const SCALE_SHADE: [u8; 4] = [0, 0, 0, 26];
const DIAMOND_INSET: f64 = 10.0;
const DIAMOND_LINE: f64 = 3.0;
const BORDER_WIDTH: f64 = 12.0;

pub(super) fn render(surface: &mut RasterSurface, paper: &CoupletPaper) {
    let mut rng = TextureRng::new(TEXTURE_SEED);
    paint_gradient(surface, &mut rng);
    if paper.texture == PaperTexture::Speckled {
        scatter_specks(surface, &mut rng);
    }
    if let Some((rows, cols)) = paper.guide_grid() {
        paint_guides(surface, rows, cols, paper.texture == PaperTexture::Clouds);
    }
    if paper.has_dragon_border() {
        paint_dragon(surface);
    }
    surface.mark_all_dirty();
}

/// Diagonal gradient from the top-left to the bottom-right corner, with grain
fn paint_gradient(surface: &mut RasterSurface, rng: &mut TextureRng) {
    let w = surface.width as f64;
    let h = surface.height as f64;
    let length_sq = (w * w + h * h).max(f64::EPSILON);
    let width = surface.width as usize;

    for (i, pixel) in surface.pixels_mut().iter_mut().enumerate() {
        let x = (i % width) as f64 + 0.5;
        let y = (i / width) as f64 + 0.5;
        let t = ((x * w + y * h) / length_sq).clamp(0.0, 1.0);
        let grain = (rng.next_f64() - 0.5) * GRAIN;
        let channel = |c: usize| {
            let start = COUPLET_GRADIENT_START[c] as f64;
            let end = COUPLET_GRADIENT_END[c] as f64;
            (start + (end - start) * t + grain).round().clamp(0.0, 255.0) as u8
        };
        *pixel = [channel(0), channel(1), channel(2), 255];
    }
}

fn scatter_specks(surface: &mut RasterSurface, rng: &mut TextureRng) {
    let total = surface.pixel_count() as u64;
    let count = (total as f64 * SPECK_DENSITY).ceil() as u64;
    let pixels = surface.pixels_mut();
    for _ in 0..count {
        pixels[rng.below(total) as usize] = SPECK;
    }
    debug!("couplet::scatter_specks: {} specks", count);
}

/// One ring per character cell
fn paint_guides(surface: &mut RasterSurface, rows: u32, cols: u32, clouds: bool) {
    let cell_w = surface.width as f64 / cols as f64;
    let cell_h = surface.height as f64 / rows as f64;
    let radius = cell_w.min(cell_h) * GUIDE_DIAMETER / 2.0;
    let ring = if clouds { GUIDE_GOLD } else { GUIDE_WHITE };

    for row in 0..rows {
        for col in 0..cols {
            let center = Point::new(
                col as f64 * cell_w + cell_w / 2.0,
                row as f64 * cell_h + cell_h / 2.0,
            );
            Painter::new(&mut *surface, Affine::IDENTITY, Composite::Over(ring))
                .stroke_circle(center, radius, GUIDE_LINE);
            if clouds {
                Painter::new(&mut *surface, Affine::IDENTITY, Composite::Over(CLOUD_FILL))
                    .fill_circle(center, radius - CLOUD_INSET);
            }
        }
    }
}

/// Overlapping half-disc scales, a gold diamond guide and a gold frame
fn paint_dragon(surface: &mut RasterSurface) {
    let w = surface.width as f64;
    let h = surface.height as f64;
    let row_step = SCALE_RADIUS * 0.8;

    let mut scales = 0;
    let mut row = 0u32;
    loop {
        let y = row as f64 * row_step;
        if y >= h + SCALE_RADIUS {
            break;
        }
        let offset = if row % 2 == 1 { SCALE_RADIUS } else { 0.0 };
        let mut x = -SCALE_RADIUS;
        while x < w + SCALE_RADIUS {
            // lower half of a disc: angles 0..pi sweep through +y
            let scale = CircleSegment::new(Point::new(x + offset, y), SCALE_RADIUS, 0.0, 0.0, std::f64::consts::PI);
            Painter::new(&mut *surface, Affine::IDENTITY, Composite::Over(SCALE_SHADE))
                .fill_shape(&scale, FillRule::NonZero);
            scales += 1;
            x += SCALE_RADIUS * 2.0;
        }
        row += 1;
    }

    let gold = Composite::Over([GOLD[0], GOLD[1], GOLD[2], 255]);
    let mut painter = Painter::new(&mut *surface, Affine::IDENTITY, gold);
    let diamond = [
        Point::new(w / 2.0, DIAMOND_INSET),
        Point::new(w - DIAMOND_INSET, h / 2.0),
        Point::new(w / 2.0, h - DIAMOND_INSET),
        Point::new(DIAMOND_INSET, h / 2.0),
    ];
    painter.stroke_polyline(&diamond, DIAMOND_LINE, true);

    // square-cornered frame: everything between the edge and the inset rect
    let mut frame: BezPath = Rect::new(0.0, 0.0, w, h).to_path(0.1);
    frame.extend(Rect::new(BORDER_WIDTH, BORDER_WIDTH, w - BORDER_WIDTH, h - BORDER_WIDTH).to_path(0.1));
    painter.fill_path(&frame, Affine::IDENTITY, FillRule::EvenOdd);

    debug!("couplet::paint_dragon: {} scales", scales);
}
