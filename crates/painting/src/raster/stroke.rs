//! Discs, rings and round-capped polylines

use kurbo::{Point, Rect};

use super::Coverage;

pub(crate) fn cover_disc(surface_width: u32, surface_height: u32, center: Point, radius: f64) -> Option<Coverage> {
    if !(radius > 0.0) {
        return None;
    }
    let bounds = Rect::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius);
    let mut coverage = Coverage::for_bounds(bounds, surface_width, surface_height)?;
    disc_into(&mut coverage, center, radius);
    Some(coverage)
}

fn disc_into(coverage: &mut Coverage, center: Point, radius: f64) {
    let r_sq = radius * radius;
    let rows = clamp_range(center.y - radius, center.y + radius, coverage.rows());
    for y in rows {
        let dy = y as f64 + 0.5 - center.y;
        let rest = r_sq - dy * dy;
        if rest < 0.0 {
            continue;
        }
        let half = rest.sqrt();
        for x in clamp_range(center.x - half, center.x + half, coverage.columns()) {
            let dx = x as f64 + 0.5 - center.x;
            if dx * dx + dy * dy <= r_sq {
                coverage.set(x, y);
            }
        }
    }
}

pub(crate) fn cover_ring(
    surface_width: u32,
    surface_height: u32,
    center: Point,
    inner: f64,
    outer: f64,
) -> Option<Coverage> {
    if !(outer > inner) {
        return None;
    }
    let bounds = Rect::new(center.x - outer, center.y - outer, center.x + outer, center.y + outer);
    let mut coverage = Coverage::for_bounds(bounds, surface_width, surface_height)?;
    let (inner_sq, outer_sq) = (inner * inner, outer * outer);
    for y in coverage.rows() {
        let dy = y as f64 + 0.5 - center.y;
        for x in coverage.columns() {
            let dx = x as f64 + 0.5 - center.x;
            let d_sq = dx * dx + dy * dy;
            if d_sq >= inner_sq && d_sq <= outer_sq {
                coverage.set(x, y);
            }
        }
    }
    Some(coverage)
}

pub(crate) fn cover_polylines(
    surface_width: u32,
    surface_height: u32,
    polylines: &[Vec<Point>],
    radius: f64,
) -> Option<Coverage> {
    if !(radius > 0.0) {
        return None;
    }
    let mut points = polylines.iter().flatten();
    let first = points.next()?;
    let mut bounds = Rect::from_points(*first, *first);
    for p in points {
        bounds = bounds.union_pt(*p);
    }
    let mut coverage = Coverage::for_bounds(bounds.inflate(radius, radius), surface_width, surface_height)?;
    for polyline in polylines {
        stroke_into(&mut coverage, polyline, radius);
    }
    Some(coverage)
}

/// Mark every pixel within `radius` of the polyline (round caps and joins)
pub(crate) fn stroke_into(coverage: &mut Coverage, polyline: &[Point], radius: f64) {
    match polyline {
        [] => {}
        [single] => disc_into(coverage, *single, radius),
        _ => {
            for pair in polyline.windows(2) {
                capsule_into(coverage, pair[0], pair[1], radius);
            }
        }
    }
}

fn capsule_into(coverage: &mut Coverage, a: Point, b: Point, radius: f64) {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        disc_into(coverage, a, radius);
        return;
    }
    let r_sq = radius * radius;
    let rows = clamp_range(a.y.min(b.y) - radius, a.y.max(b.y) + radius, coverage.rows());
    let columns = coverage.columns();
    let x_lo = a.x.min(b.x) - radius;
    let x_hi = a.x.max(b.x) + radius;
    for y in rows {
        let py = y as f64 + 0.5;
        for x in clamp_range(x_lo, x_hi, columns.clone()) {
            let p = Point::new(x as f64 + 0.5, py);
            let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
            let closest = a + ab * t;
            if (p - closest).hypot2() <= r_sq {
                coverage.set(x, y);
            }
        }
    }
}

/// Pixel indices whose centers may fall in `[lo, hi]`, clamped to `within`
fn clamp_range(lo: f64, hi: f64, within: std::ops::Range<u32>) -> std::ops::Range<u32> {
    let start = (lo - 0.5).ceil().max(within.start as f64);
    let end = ((hi - 0.5).floor() + 1.0).min(within.end as f64);
    if !(start < end) {
        return within.start..within.start;
    }
    start as u32..end as u32
}
