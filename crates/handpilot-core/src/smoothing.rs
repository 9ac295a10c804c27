//! Cursor jitter reduction

use std::collections::VecDeque;

/// Weighted moving average over the last N cursor positions.
///
/// Weights rise linearly from oldest to newest and are normalized to sum to one.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    history: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CursorSmoother {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Push a raw position and return the smoothed one
    pub fn smooth(&mut self, x: f64, y: f64) -> (f64, f64) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((x, y));

        let n = self.history.len();
        if n < 2 {
            return (x, y);
        }

        // linspace(0.1, 1.0, n)
        let step = 0.9 / (n - 1) as f64;
        let weights: Vec<f64> = (0..n).map(|i| 0.1 + step * i as f64).collect();
        let total: f64 = weights.iter().sum();

        self.history
            .iter()
            .zip(&weights)
            .fold((0.0, 0.0), |(sx, sy), (&(px, py), &w)| {
                (sx + px * w / total, sy + py * w / total)
            })
    }

    /// Drop all history (recalibration)
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
