use std::collections::VecDeque;

use serde_derive::{Deserialize, Serialize};

/// One position sample tagged with its time index (frame count or
/// timestamp). Immutable once stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    pub x: f32,
    pub y: f32,
    pub t: f32,
}

impl TimedPoint {
    pub fn new(x: f32, y: f32, t: f32) -> Self {
        Self { x, y, t }
    }
}

/// Chronological, capacity-bounded sample window for one target. Appending
/// to a full window evicts the oldest sample. Every append bumps `version`,
/// which keys prediction-cache invalidation downstream.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    points: VecDeque<TimedPoint>,
    capacity: usize,
    version: u64,
}

impl PositionHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// Time must not decrease between consecutive samples.
    pub fn push(&mut self, point: TimedPoint) -> Option<TimedPoint> {
        debug_assert!(self.points.back().map_or(true, |last| point.t >= last.t));

        let evicted = if self.is_full() {
            self.points.pop_front()
        } else {
            None
        };

        self.points.push_back(point);
        self.version += 1;

        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn last(&self) -> Option<&TimedPoint> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.version += 1;
    }

    /// Oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ TimedPoint> {
        self.points.iter()
    }

    // Parallel projections for the regression routines; the point sequence
    // stays the source of truth.

    pub fn xs(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn ts(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.t).collect()
    }
}
