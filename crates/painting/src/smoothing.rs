//! Jitter filtering and midpoint quadratic smoothing

use kurbo::{Point, QuadBez};

/// Per-gesture smoother for cut strokes.
///
/// Samples closer than `min_distance` to the last accepted sample are
/// dropped. From the third accepted sample on, every accepted sample yields a
/// quadratic segment between the midpoints around the previous sample, so
/// consecutive segments join with matching tangents.
#[derive(Debug, Clone)]
pub struct StrokeSmoother {
    /// The three most recent accepted samples, oldest first
    window: [Point; 3],
    accepted: usize,
    min_distance: f64,
}

impl StrokeSmoother {
    /// Start a gesture at `start`, which counts as the first accepted sample
    pub fn new(start: Point, min_distance: f64) -> Self {
        Self {
            window: [start; 3],
            accepted: 1,
            min_distance,
        }
    }

    pub fn last_accepted(&self) -> Point {
        self.window[2]
    }

    /// Total samples accepted this gesture, including the start
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Offer a raw sample. Returns the segment to paint, if any.
    pub fn accept(&mut self, point: Point) -> Option<QuadBez> {
        if point.distance(self.last_accepted()) < self.min_distance {
            return None;
        }
        self.window = [self.window[1], self.window[2], point];
        self.accepted += 1;
        if self.accepted < 3 {
            return None;
        }
        let [p0, p1, p2] = self.window;
        Some(QuadBez::new(p0.midpoint(p1), p1, p1.midpoint(p2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_is_dropped() {
        let mut smoother = StrokeSmoother::new(Point::new(0.0, 0.0), 4.0);
        assert!(smoother.accept(Point::new(2.0, 2.0)).is_none());
        assert!(smoother.accept(Point::new(3.9, 0.0)).is_none());
        assert_eq!(smoother.accepted(), 1);
        assert_eq!(smoother.last_accepted(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_third_sample_emits_segment() {
        let mut smoother = StrokeSmoother::new(Point::new(0.0, 0.0), 4.0);
        assert!(smoother.accept(Point::new(10.0, 0.0)).is_none());
        let segment = smoother.accept(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(segment.p0, Point::new(5.0, 0.0));
        assert_eq!(segment.p1, Point::new(10.0, 0.0));
        assert_eq!(segment.p2, Point::new(10.0, 5.0));
    }

    #[test]
    fn test_segments_chain_at_midpoints() {
        let mut smoother = StrokeSmoother::new(Point::new(0.0, 0.0), 1.0);
        let samples = [(10.0, 0.0), (20.0, 5.0), (30.0, 0.0), (40.0, 8.0)];
        let segments: Vec<QuadBez> = samples
            .iter()
            .filter_map(|&(x, y)| smoother.accept(Point::new(x, y)))
            .collect();
        assert_eq!(segments.len(), 3);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].p2, pair[1].p0);
        }
    }

    #[test]
    fn test_threshold_measured_from_last_accepted() {
        let mut smoother = StrokeSmoother::new(Point::new(0.0, 0.0), 4.0);
        // creeping in 3 px steps: every other sample is far enough
        assert!(smoother.accept(Point::new(3.0, 0.0)).is_none());
        assert!(smoother.accept(Point::new(6.0, 0.0)).is_none());
        assert_eq!(smoother.accepted(), 2);
        assert_eq!(smoother.last_accepted(), Point::new(6.0, 0.0));
    }
}
