//! Bounded snapshot history for undo

use std::collections::VecDeque;

use tracing::debug;

use crate::surface::Snapshot;

/// Snapshot stack with a fixed capacity. Pushing at capacity evicts the
/// oldest entry; there is no redo.
#[derive(Debug)]
pub struct HistoryStack {
    /// Oldest at the front, newest at the back
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryStack {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
            debug!("HistoryStack: evicted oldest snapshot (capacity {})", self.capacity);
        }
        self.entries.push_back(snapshot);
    }

    /// Remove and return the newest snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    fn snapshot(value: u8) -> Snapshot {
        let mut surface = RasterSurface::new(2, 2, 1.0);
        surface.clear([value; 4]);
        surface.snapshot()
    }

    #[test]
    fn test_pop_returns_newest() {
        let mut history = HistoryStack::new(5);
        history.push(snapshot(1));
        history.push(snapshot(2));
        assert_eq!(history.pop().unwrap().pixels()[0], [2; 4]);
        assert_eq!(history.pop().unwrap().pixels()[0], [1; 4]);
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_push_at_capacity_evicts_oldest() {
        let mut history = HistoryStack::new(3);
        for value in 1..=4 {
            history.push(snapshot(value));
        }
        assert_eq!(history.len(), 3);
        let remaining: Vec<u8> = std::iter::from_fn(|| history.pop()).map(|s| s.pixels()[0][0]).collect();
        assert_eq!(remaining, vec![4, 3, 2]);
    }

    #[test]
    fn test_shrinking_capacity_keeps_newest() {
        let mut history = HistoryStack::new(4);
        for value in 1..=4 {
            history.push(snapshot(value));
        }
        history.set_capacity(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().pixels()[0], [4; 4]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = HistoryStack::new(0);
        history.push(snapshot(1));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
    }
}
