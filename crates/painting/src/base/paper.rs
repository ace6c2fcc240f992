//! Cut-mode paper sheet

use ab_glyph::{Font, FontArc, OutlineCurve};
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use tracing::{debug, warn};

use super::noise::TextureRng;
use crate::constants::{DESCRIPTOR_EXTENT, PAPER_COLOR, TEXTURE_SEED};
use crate::descriptor::{PaperDescriptor, PaperShape};
use crate::raster::Painter;
use crate::surface::{RasterSurface, source_atop};
use crate::types::{Composite, FillRule};

/// Solid circle radius, as a fraction of buffer width
const CIRCLE_RADIUS: f64 = 0.45;
/// Square and octagon inset, as a fraction of buffer width
const SHEET_MARGIN: f64 = 0.05;
/// Octagon corner cut, as a fraction of the inset side
const OCTAGON_CUT: f64 = 0.3;
/// Silhouettes span this fraction of the buffer width
const SILHOUETTE_SPAN: f64 = 0.9;
/// Skeleton glyph em size, outline width and downward shift (fractions of width)
const GLYPH_EM: f64 = 0.72;
const GLYPH_OUTLINE: f64 = 0.028;
const GLYPH_SHIFT: f64 = 0.06;
/// Fraction of pixels that stay free of fibers
const FIBER_THRESHOLD: f64 = 0.55;

pub(super) fn render(surface: &mut RasterSurface, descriptor: &PaperDescriptor, font: Option<&FontArc>) {
    let w = surface.width as f64;
    let h = surface.height as f64;
    let center = Point::new(w / 2.0, h / 2.0);
    let normalized = descriptor_placement(w, center);

    let mut painter = Painter::new(&mut *surface, Affine::IDENTITY, Composite::Over(PAPER_COLOR));
    match descriptor {
        PaperDescriptor::Solid { shape } => match shape {
            PaperShape::Circle => painter.fill_circle(center, w * CIRCLE_RADIUS),
            PaperShape::Diamond => {
                let corners = [
                    Point::new(center.x, 0.0),
                    Point::new(w, center.y),
                    Point::new(center.x, h),
                    Point::new(0.0, center.y),
                ];
                painter.fill_path(&closed_polygon(&corners), Affine::IDENTITY, FillRule::NonZero);
            }
            PaperShape::Square => {
                let m = w * SHEET_MARGIN;
                painter.fill_rect(Rect::new(m, m, w - m, h - m));
            }
            PaperShape::Octagon => {
                let m = w * SHEET_MARGIN;
                let sheet = Rect::new(m, m, w - m, h - m);
                painter.fill_path(&octagon(sheet), Affine::IDENTITY, FillRule::NonZero);
            }
        },
        PaperDescriptor::Silhouette { path } => {
            painter.fill_path(path, normalized, FillRule::EvenOdd);
        }
        PaperDescriptor::Skeleton { glyph, extra_path } => {
            match font {
                Some(font) => match glyph_outline(font, *glyph, w * GLYPH_EM, center + Vec2::new(0.0, w * GLYPH_SHIFT)) {
                    Some(outline) => painter.fill_and_stroke_path(
                        &outline,
                        Affine::IDENTITY,
                        FillRule::NonZero,
                        w * GLYPH_OUTLINE,
                    ),
                    None => warn!("Skeleton glyph {:?} has no outline in the supplied font", glyph),
                },
                None => warn!("No font supplied; skipping skeleton glyph {:?}", glyph),
            }
            if let Some(extra) = extra_path {
                painter.fill_path(extra, normalized, FillRule::EvenOdd);
            }
        }
    }
    debug!("paper::render: {} px of paper laid down", painter.changed());

    apply_fiber_texture(surface);
}

/// Maps the 0-100 descriptor frame onto the centered silhouette area
fn descriptor_placement(width: f64, center: Point) -> Affine {
    let half = DESCRIPTOR_EXTENT / 2.0;
    Affine::translate(center.to_vec2())
        * Affine::scale(width * SILHOUETTE_SPAN / DESCRIPTOR_EXTENT)
        * Affine::translate((-half, -half))
}

fn closed_polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(*p);
        } else {
            path.line_to(*p);
        }
    }
    path.close_path();
    path
}

fn octagon(sheet: Rect) -> BezPath {
    let cut = sheet.width().min(sheet.height()) * OCTAGON_CUT;
    closed_polygon(&[
        Point::new(sheet.x0 + cut, sheet.y0),
        Point::new(sheet.x1 - cut, sheet.y0),
        Point::new(sheet.x1, sheet.y0 + cut),
        Point::new(sheet.x1, sheet.y1 - cut),
        Point::new(sheet.x1 - cut, sheet.y1),
        Point::new(sheet.x0 + cut, sheet.y1),
        Point::new(sheet.x0, sheet.y1 - cut),
        Point::new(sheet.x0, sheet.y0 + cut),
    ])
}

/// Point of the text line placed on the anchor: the middle of the advance
/// horizontally and the middle of the em box (between ascent and descent)
/// vertically, in y-up font units
fn text_middle(advance: f64, ascent: f64, descent: f64) -> (f64, f64) {
    (advance / 2.0, (ascent + descent) / 2.0)
}

/// Glyph outline at `em_px`, its text middle placed on `anchor`.
///
/// Font units are y-up; the result is in buffer pixels (y-down).
fn glyph_outline(font: &FontArc, glyph: char, em_px: f64, anchor: Point) -> Option<BezPath> {
    let id = font.glyph_id(glyph);
    if id.0 == 0 {
        return None;
    }
    let outline = font.outline(id)?;
    let units = font.units_per_em()? as f64;
    let scale = em_px / units;
    let (mid_x, mid_y) = text_middle(
        font.h_advance_unscaled(id) as f64,
        font.ascent_unscaled() as f64,
        font.descent_unscaled() as f64,
    );
    let to_px = |p: ab_glyph::Point| {
        Point::new(
            anchor.x + (p.x as f64 - mid_x) * scale,
            anchor.y - (p.y as f64 - mid_y) * scale,
        )
    };

    let mut path = BezPath::new();
    let mut pen: Option<Point> = None;
    for curve in &outline.curves {
        let (start, end) = match curve {
            OutlineCurve::Line(a, b) => (to_px(*a), to_px(*b)),
            OutlineCurve::Quad(a, _, b) => (to_px(*a), to_px(*b)),
            OutlineCurve::Cubic(a, _, _, b) => (to_px(*a), to_px(*b)),
        };
        // a curve that does not continue from the pen starts a new contour
        if pen.is_none_or(|p| p.distance(start) > 1e-6) {
            if pen.is_some() {
                path.close_path();
            }
            path.move_to(start);
        }
        match curve {
            OutlineCurve::Line(..) => path.line_to(end),
            OutlineCurve::Quad(_, c, _) => path.quad_to(to_px(*c), end),
            OutlineCurve::Cubic(_, c1, c2, _) => path.curve_to(to_px(*c1), to_px(*c2), end),
        }
        pen = Some(end);
    }
    if pen.is_some() {
        path.close_path();
    }
    Some(path)
}

/// Burgundy fibers composited only onto pixels that already hold paper
fn apply_fiber_texture(surface: &mut RasterSurface) {
    let mut rng = TextureRng::new(TEXTURE_SEED);
    let mut fibers = 0usize;
    for pixel in surface.pixels_mut() {
        if rng.next_f64() <= FIBER_THRESHOLD {
            continue;
        }
        let fleck = [
            (100.0 + rng.next_f64() * 40.0) as u8,
            (rng.next_f64() * 20.0) as u8,
            (rng.next_f64() * 20.0) as u8,
            20 + rng.below(40) as u8,
        ];
        let textured = source_atop(fleck, *pixel);
        if textured != *pixel {
            *pixel = textured;
            fibers += 1;
        }
    }
    surface.mark_all_dirty();
    debug!("paper::apply_fiber_texture: {} fibers", fibers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TRANSPARENT;

    fn rendered(descriptor: &PaperDescriptor, size: u32) -> RasterSurface {
        let mut surface = RasterSurface::new(size, size, 1.0);
        render(&mut surface, descriptor, None);
        surface
    }

    fn is_paper(pixel: [u8; 4]) -> bool {
        pixel[3] == 255 && pixel[0] > 100
    }

    #[test]
    fn test_circle_sheet() {
        let surface = rendered(&PaperDescriptor::solid(PaperShape::Circle), 100);
        assert!(is_paper(surface.get_pixel(50, 50).unwrap()));
        assert!(is_paper(surface.get_pixel(50, 6).unwrap()));
        assert_eq!(surface.get_pixel(1, 1), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(50, 2), Some(TRANSPARENT));
    }

    #[test]
    fn test_diamond_and_square_sheets() {
        let surface = rendered(&PaperDescriptor::solid(PaperShape::Diamond), 100);
        assert!(is_paper(surface.get_pixel(50, 50).unwrap()));
        assert_eq!(surface.get_pixel(10, 10), Some(TRANSPARENT));

        let surface = rendered(&PaperDescriptor::solid(PaperShape::Square), 100);
        assert!(is_paper(surface.get_pixel(6, 6).unwrap()));
        assert_eq!(surface.get_pixel(3, 50), Some(TRANSPARENT));
    }

    #[test]
    fn test_octagon_cuts_corners() {
        let surface = rendered(&PaperDescriptor::solid(PaperShape::Octagon), 100);
        assert!(is_paper(surface.get_pixel(50, 6).unwrap()));
        assert_eq!(surface.get_pixel(7, 7), Some(TRANSPARENT));
    }

    #[test]
    fn test_silhouette_even_odd() {
        // square ring in the normalized frame
        let ring = "M0 0 L100 0 L100 100 L0 100 Z M30 30 L70 30 L70 70 L30 70 Z";
        let surface = rendered(&PaperDescriptor::silhouette(ring).unwrap(), 100);
        assert!(is_paper(surface.get_pixel(10, 10).unwrap()));
        assert_eq!(surface.get_pixel(50, 50), Some(TRANSPARENT));
    }

    #[test]
    fn test_skeleton_without_font_draws_extra_path() {
        let descriptor = PaperDescriptor::skeleton('福', Some("M40 40 L60 40 L60 60 L40 60 Z")).unwrap();
        let surface = rendered(&descriptor, 100);
        assert!(is_paper(surface.get_pixel(50, 50).unwrap()));
        assert_eq!(surface.get_pixel(10, 10), Some(TRANSPARENT));
    }

    #[test]
    fn test_text_middle_ignores_ink_bounds() {
        // 1000 unit em, ascent 880 and descent -120
        assert_eq!(text_middle(1000.0, 880.0, -120.0), (500.0, 380.0));
        // a narrow glyph still centers on its advance
        assert_eq!(text_middle(600.0, 800.0, -200.0), (300.0, 300.0));
    }

    #[test]
    fn test_fibers_only_touch_paper() {
        let surface = rendered(&PaperDescriptor::solid(PaperShape::Circle), 200);
        let mut textured = 0;
        for pixel in surface.pixels() {
            if pixel[3] == 0 {
                assert_eq!(*pixel, TRANSPARENT);
            } else {
                assert_eq!(pixel[3], 255);
                if *pixel != PAPER_COLOR {
                    textured += 1;
                }
            }
        }
        assert!(textured > 0);
    }
}
