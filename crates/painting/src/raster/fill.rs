//! Scanline polygon fill

use kurbo::{Affine, PathEl, Point, Rect};

use super::Coverage;
use crate::constants::FLATTEN_TOLERANCE;
use crate::types::FillRule;

/// Transform a path and flatten it into one point list per subpath.
///
/// An explicit `ClosePath` appends the subpath's first point; filling treats
/// every subpath as closed regardless.
pub fn flatten_subpaths(elements: impl IntoIterator<Item = PathEl>, transform: Affine) -> Vec<Vec<Point>> {
    let mut subpaths: Vec<Vec<Point>> = Vec::new();
    let placed = elements.into_iter().map(|el| transform * el);
    kurbo::flatten(placed, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => subpaths.push(vec![p]),
        PathEl::LineTo(p) => match subpaths.last_mut() {
            Some(current) => current.push(p),
            None => subpaths.push(vec![p]),
        },
        PathEl::ClosePath => {
            if let Some(current) = subpaths.last_mut() {
                if let (Some(first), Some(last)) = (current.first().copied(), current.last().copied()) {
                    if first != last {
                        current.push(first);
                    }
                }
            }
        }
        // flatten only emits move/line/close
        _ => {}
    });
    subpaths.retain(|s| !s.is_empty());
    subpaths
}

/// Bounding box of all polygon vertices
pub(crate) fn polygon_bounds(polygons: &[Vec<Point>]) -> Option<Rect> {
    let mut points = polygons.iter().flatten();
    let first = points.next()?;
    let mut bounds = Rect::from_points(*first, *first);
    for p in points {
        bounds = bounds.union_pt(*p);
    }
    Some(bounds)
}

/// Rasterize closed polygons into a fresh mask
pub(crate) fn cover_polygons(
    surface_width: u32,
    surface_height: u32,
    polygons: &[Vec<Point>],
    rule: FillRule,
) -> Option<Coverage> {
    let bounds = polygon_bounds(polygons)?;
    let mut coverage = Coverage::for_bounds(bounds, surface_width, surface_height)?;
    fill_into(&mut coverage, polygons, rule);
    Some(coverage)
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        // store top-to-bottom, remember the original direction
        if a.y < b.y {
            Some(Edge { x0: a.x, y0: a.y, x1: b.x, y1: b.y, winding: 1 })
        } else {
            Some(Edge { x0: b.x, y0: b.y, x1: a.x, y1: a.y, winding: -1 })
        }
    }

    #[inline]
    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// Mark pixels whose centers are inside the polygons under `rule`
pub(crate) fn fill_into(coverage: &mut Coverage, polygons: &[Vec<Point>], rule: FillRule) {
    let mut edges = Vec::new();
    for polygon in polygons {
        if polygon.len() < 2 {
            continue;
        }
        for pair in polygon.windows(2) {
            edges.extend(Edge::new(pair[0], pair[1]));
        }
        // implicit close
        let (first, last) = (polygon[0], polygon[polygon.len() - 1]);
        if first != last {
            edges.extend(Edge::new(last, first));
        }
    }
    if edges.is_empty() {
        return;
    }

    let columns = coverage.columns();
    let mut crossings: Vec<(f64, i32)> = Vec::with_capacity(16);
    for y in coverage.rows() {
        let sample_y = y as f64 + 0.5;
        crossings.clear();
        for edge in &edges {
            // half-open so shared vertices are counted once
            if edge.y0 <= sample_y && sample_y < edge.y1 {
                crossings.push((edge.x_at(sample_y), edge.winding));
            }
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        for i in 0..crossings.len() - 1 {
            winding += crossings[i].1;
            let inside = match rule {
                FillRule::NonZero => winding != 0,
                FillRule::EvenOdd => winding % 2 != 0,
            };
            if !inside {
                continue;
            }
            // pixel px is covered when px + 0.5 lies in [x0, x1], closed on
            // both ends so mirrored edges cover mirrored pixels
            let start = (crossings[i].0 - 0.5).ceil().max(columns.start as f64);
            let end = ((crossings[i + 1].0 - 0.5).floor() + 1.0).min(columns.end as f64);
            if start >= end {
                continue;
            }
            for x in start as u32..end as u32 {
                coverage.set(x, y);
            }
        }
    }
}
