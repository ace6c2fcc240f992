//! Binary-coverage rasterization of paint primitives
//!
//! Every primitive is first rasterized into a [`Coverage`] mask (a pixel is
//! covered when its center lies inside the shape) and the mask is then
//! composited onto the surface in one pass, so overlapping parts of a single
//! primitive never blend twice.

mod fill;
mod stroke;

use kurbo::{Affine, BezPath, Point, QuadBez, Rect, Shape};
use tracing::debug;

use crate::constants::FLATTEN_TOLERANCE;
use crate::surface::RasterSurface;
use crate::types::{Composite, FillRule};

pub use fill::flatten_subpaths;

/// Pixel mask over a clamped rectangle of the surface
#[derive(Debug, Clone)]
pub struct Coverage {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Coverage {
    /// Mask covering every pixel whose center may fall inside `bounds`.
    /// Returns None if the bounds miss the surface entirely.
    pub fn for_bounds(bounds: Rect, surface_width: u32, surface_height: u32) -> Option<Self> {
        if !(bounds.x0.is_finite() && bounds.y0.is_finite() && bounds.x1.is_finite() && bounds.y1.is_finite()) {
            return None;
        }
        let x_min = bounds.x0.floor().max(0.0);
        let y_min = bounds.y0.floor().max(0.0);
        let x_max = bounds.x1.ceil().min(surface_width as f64);
        let y_max = bounds.y1.ceil().min(surface_height as f64);
        if x_min >= x_max || y_min >= y_max {
            return None;
        }
        let (x0, y0) = (x_min as u32, y_min as u32);
        let width = x_max as u32 - x0;
        let height = y_max as u32 - y0;
        Some(Self {
            x0,
            y0,
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        })
    }

    /// Pixel rows spanned by the mask (absolute y)
    #[inline]
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.y0..self.y0 + self.height
    }

    /// Pixel columns spanned by the mask (absolute x)
    #[inline]
    pub fn columns(&self) -> std::ops::Range<u32> {
        self.x0..self.x0 + self.width
    }

    /// Mark an absolute pixel as covered; ignored outside the mask
    #[inline]
    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.x0 || y < self.y0 {
            return;
        }
        let (lx, ly) = (x - self.x0, y - self.y0);
        if lx < self.width && ly < self.height {
            self.bits[(ly as usize) * (self.width as usize) + lx as usize] = true;
        }
    }

    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x < self.x0 || y < self.y0 {
            return false;
        }
        let (lx, ly) = (x - self.x0, y - self.y0);
        lx < self.width && ly < self.height && self.bits[(ly as usize) * (self.width as usize) + lx as usize]
    }

    /// Number of covered pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Composite every covered pixel. Returns the number of pixels that changed.
    pub fn apply(&self, surface: &mut RasterSurface, composite: Composite) -> usize {
        let mut changed = 0;
        for ly in 0..self.height {
            let row = (ly as usize) * (self.width as usize);
            for lx in 0..self.width {
                if self.bits[row + lx as usize]
                    && surface.composite_pixel(self.x0 + lx, self.y0 + ly, composite)
                {
                    changed += 1;
                }
            }
        }
        if changed > 0 {
            surface.mark_region_dirty(self.x0, self.y0, self.width, self.height);
        }
        changed
    }
}

/// Paints primitives onto a surface through a fixed placement transform.
///
/// Compositors hand one `Painter` per symmetric placement to a paint
/// strategy; the strategy draws in its own frame and never sees the
/// placement.
pub struct Painter<'a> {
    surface: &'a mut RasterSurface,
    transform: Affine,
    composite: Composite,
    changed: usize,
}

impl<'a> Painter<'a> {
    pub fn new(surface: &'a mut RasterSurface, transform: Affine, composite: Composite) -> Self {
        Self {
            surface,
            transform,
            composite,
            changed: 0,
        }
    }

    /// Placement transform from the strategy's frame to buffer pixels
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Pixels changed so far by this painter
    pub fn changed(&self) -> usize {
        self.changed
    }

    /// Length scale of the placement (1.0 for rotations and mirrors)
    fn length_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    fn commit(&mut self, coverage: Option<Coverage>) {
        if let Some(coverage) = coverage {
            self.changed += coverage.apply(self.surface, self.composite);
        }
    }

    /// Filled disc (a dab)
    pub fn fill_circle(&mut self, center: Point, radius: f64) {
        let center = self.transform * center;
        let radius = radius * self.length_scale();
        let coverage = stroke::cover_disc(self.surface.width, self.surface.height, center, radius);
        self.commit(coverage);
    }

    /// Circle outline of the given line width
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64) {
        let scale = self.length_scale();
        let center = self.transform * center;
        let half = width * scale / 2.0;
        let radius = radius * scale;
        let coverage = stroke::cover_ring(
            self.surface.width,
            self.surface.height,
            center,
            (radius - half).max(0.0),
            radius + half,
        );
        self.commit(coverage);
    }

    /// Quadratic curve with round caps
    pub fn stroke_quad(&mut self, quad: QuadBez, width: f64) {
        let mut path = BezPath::new();
        path.move_to(quad.p0);
        path.quad_to(quad.p1, quad.p2);
        self.stroke_path(&path, Affine::IDENTITY, width);
    }

    /// Polyline with round caps and joins
    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, closed: bool) {
        let mut polyline: Vec<Point> = points.iter().map(|p| self.transform * *p).collect();
        if closed && polyline.len() > 2 {
            polyline.push(polyline[0]);
        }
        let radius = width * self.length_scale() / 2.0;
        let coverage = stroke::cover_polylines(self.surface.width, self.surface.height, &[polyline], radius);
        self.commit(coverage);
    }

    /// Stroke every subpath of `path` (placed by `local`) with round caps and joins
    pub fn stroke_path(&mut self, path: &BezPath, local: Affine, width: f64) {
        let subpaths = flatten_subpaths(path.iter(), self.transform * local);
        let radius = width * self.length_scale() / 2.0;
        let coverage = stroke::cover_polylines(self.surface.width, self.surface.height, &subpaths, radius);
        self.commit(coverage);
    }

    /// Fill `path` (placed by `local`) with the given rule
    pub fn fill_path(&mut self, path: &BezPath, local: Affine, rule: FillRule) {
        let subpaths = flatten_subpaths(path.iter(), self.transform * local);
        let coverage = fill::cover_polygons(self.surface.width, self.surface.height, &subpaths, rule);
        self.commit(coverage);
    }

    /// Fill a kurbo shape (circle segments, rects, ellipses)
    pub fn fill_shape(&mut self, shape: &impl Shape, rule: FillRule) {
        let subpaths = flatten_subpaths(shape.path_elements(FLATTEN_TOLERANCE / 2.0), self.transform);
        let coverage = fill::cover_polygons(self.surface.width, self.surface.height, &subpaths, rule);
        self.commit(coverage);
    }

    /// Fill `path` and stroke its outline in one composite, so the stroke and
    /// the fill never double-blend
    pub fn fill_and_stroke_path(&mut self, path: &BezPath, local: Affine, rule: FillRule, width: f64) {
        let placement = self.transform * local;
        let polygons = flatten_subpaths(path.iter(), placement);
        let radius = width * self.length_scale() / 2.0;

        let Some(bounds) = fill::polygon_bounds(&polygons).map(|b| b.inflate(radius, radius)) else {
            return;
        };
        let Some(mut coverage) = Coverage::for_bounds(bounds, self.surface.width, self.surface.height) else {
            return;
        };
        fill::fill_into(&mut coverage, &polygons, rule);
        for polygon in &polygons {
            stroke::stroke_into(&mut coverage, polygon, radius);
        }
        debug!(
            "Painter::fill_and_stroke_path: {} subpaths, {} px covered",
            polygons.len(),
            coverage.count()
        );
        self.commit(Some(coverage));
    }

    /// Axis-aligned rectangle in the painter's frame
    pub fn fill_rect(&mut self, rect: Rect) {
        self.fill_shape(&rect, FillRule::NonZero);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TRANSPARENT;

    const RED: [u8; 4] = [217, 34, 34, 255];

    fn paper(size: u32) -> RasterSurface {
        let mut surface = RasterSurface::new(size, size, 1.0);
        surface.clear(RED);
        surface
    }

    #[test]
    fn test_fill_circle_erases_disc() {
        let mut surface = paper(64);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.fill_circle(Point::new(32.0, 32.0), 10.0);
        let changed = painter.changed();

        assert_eq!(surface.get_pixel(32, 32), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(32, 45), Some(RED));
        // Area of a radius-10 disc, within rasterization tolerance
        assert!((changed as f64 - std::f64::consts::PI * 100.0).abs() < 20.0);
    }

    #[test]
    fn test_transform_places_primitive() {
        let mut surface = paper(64);
        let mut painter = Painter::new(
            &mut surface,
            Affine::translate((32.0, 32.0)),
            Composite::Erase,
        );
        painter.fill_circle(Point::new(-20.0, 0.0), 3.0);
        assert_eq!(surface.get_pixel(12, 32), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(52, 32), Some(RED));
    }

    #[test]
    fn test_even_odd_leaves_hole() {
        let mut surface = paper(100);
        let mut path = BezPath::new();
        // outer square
        path.move_to((10.0, 10.0));
        path.line_to((90.0, 10.0));
        path.line_to((90.0, 90.0));
        path.line_to((10.0, 90.0));
        path.close_path();
        // inner square, same winding
        path.move_to((30.0, 30.0));
        path.line_to((70.0, 30.0));
        path.line_to((70.0, 70.0));
        path.line_to((30.0, 70.0));
        path.close_path();

        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.fill_path(&path, Affine::IDENTITY, FillRule::EvenOdd);
        assert_eq!(surface.get_pixel(20, 20), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(50, 50), Some(RED));

        let mut surface = paper(100);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.fill_path(&path, Affine::IDENTITY, FillRule::NonZero);
        assert_eq!(surface.get_pixel(50, 50), Some(TRANSPARENT));
    }

    #[test]
    fn test_stroke_quad_has_round_caps() {
        let mut surface = paper(100);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.stroke_quad(
            QuadBez::new((20.0, 50.0), (50.0, 50.0), (80.0, 50.0)),
            10.0,
        );
        assert_eq!(surface.get_pixel(50, 50), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(50, 53), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(50, 57), Some(RED));
        // cap extends past the endpoint by the radius
        assert_eq!(surface.get_pixel(83, 50), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(87, 50), Some(RED));
    }

    #[test]
    fn test_semi_transparent_stroke_blends_once() {
        let mut surface = RasterSurface::new(60, 60, 1.0);
        surface.clear([255, 255, 255, 255]);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Over([0, 0, 0, 128]));
        // overlapping segments meet at (30, 30)
        painter.stroke_polyline(
            &[Point::new(10.0, 30.0), Point::new(30.0, 30.0), Point::new(30.0, 50.0)],
            6.0,
            false,
        );
        let joint = surface.get_pixel(30, 30).unwrap();
        let segment = surface.get_pixel(20, 30).unwrap();
        assert_eq!(joint, segment);
    }

    #[test]
    fn test_primitive_outside_surface_is_noop() {
        let mut surface = paper(16);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.fill_circle(Point::new(-100.0, -100.0), 5.0);
        assert_eq!(painter.changed(), 0);
        assert!(surface.pixels().iter().all(|p| *p == RED));
    }

    #[test]
    fn test_stroke_circle_ring() {
        let mut surface = paper(100);
        let mut painter = Painter::new(&mut surface, Affine::IDENTITY, Composite::Erase);
        painter.stroke_circle(Point::new(50.0, 50.0), 30.0, 4.0);
        assert_eq!(surface.get_pixel(50, 50), Some(RED));
        assert_eq!(surface.get_pixel(80, 50), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(50, 19), Some(TRANSPARENT));
        assert_eq!(surface.get_pixel(90, 50), Some(RED));
    }
}
