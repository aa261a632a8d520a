// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded history of recent pointer positions.

use kurbo::Point;
use smallvec::SmallVec;

/// Number of samples a [`PointerTrail`] keeps.
pub const TRAIL_CAPACITY: usize = 8;

/// One pointer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailPoint {
    /// Position.
    pub point: Point,
    /// Timestamp in milliseconds.
    pub time_ms: u64,
}

/// The last [`TRAIL_CAPACITY`] pointer samples, oldest first.
#[derive(Clone, Debug, Default)]
pub struct PointerTrail {
    points: SmallVec<[TrailPoint; TRAIL_CAPACITY]>,
}

impl PointerTrail {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sample, dropping the oldest one when full.
    ///
    /// Non-finite points are ignored.
    pub fn push(&mut self, point: Point, time_ms: u64) {
        if !point.is_finite() {
            return;
        }
        if self.points.len() == TRAIL_CAPACITY {
            self.points.remove(0);
        }
        self.points.push(TrailPoint { point, time_ms });
    }

    /// Samples, oldest first.
    #[must_use]
    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    /// The most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.last()
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Forgets all samples.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_samples() {
        let mut trail = PointerTrail::new();
        for i in 0..(TRAIL_CAPACITY as u64 + 3) {
            trail.push(Point::new(i as f64, 0.0), i);
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.points()[0].time_ms, 3);
        assert_eq!(trail.last().map(|p| p.time_ms), Some(TRAIL_CAPACITY as u64 + 2));
    }

    #[test]
    fn ignores_non_finite_samples() {
        let mut trail = PointerTrail::new();
        trail.push(Point::new(f64::NAN, 1.0), 0);
        trail.push(Point::new(1.0, f64::INFINITY), 1);
        assert!(trail.is_empty());
    }
}
