//! Waypoint queue built from a control curve
//!
//! A curve is quantized once into per-tick waypoints, then consumed one per
//! tick. The queue is a flat arena plus a read cursor: consumption never
//! shifts memory, and setting a new curve replaces the whole queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::curve::ControlCurve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no curve set before path generation")]
    NoCurve,
    #[error("path generation needs at least one sample")]
    ZeroSamples,
    #[error("waypoint queue exhausted")]
    Exhausted,
}

/// Consumable waypoint sequence for one actor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    curve: Option<ControlCurve>,
    waypoints: Vec<Vec2>,
    cursor: usize,
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the curve, dropping any pending waypoints
    pub fn set_curve(&mut self, start: Vec2, control: Vec2, end: Vec2) {
        self.curve = Some(ControlCurve::new(start, control, end));
        self.waypoints.clear();
        self.cursor = 0;
    }

    /// Quantize the curve into exactly `sample_count` waypoints
    ///
    /// The curve is sampled at `sample_count + 1` points and the first one
    /// (the start, already occupied by the actor) is dropped.
    pub fn generate_path(&mut self, sample_count: usize) -> Result<usize, PathError> {
        let curve = self.curve.ok_or(PathError::NoCurve)?;
        if sample_count == 0 {
            return Err(PathError::ZeroSamples);
        }

        self.waypoints.clear();
        self.waypoints
            .extend(curve.sample(sample_count).into_iter().skip(1));
        self.cursor = 0;

        log::debug!("generated path with {} waypoints", self.waypoints.len());
        Ok(self.waypoints.len())
    }

    /// Pop the next waypoint
    pub fn advance(&mut self) -> Result<Vec2, PathError> {
        let point = *self
            .waypoints
            .get(self.cursor)
            .ok_or(PathError::Exhausted)?;
        self.cursor += 1;
        Ok(point)
    }

    /// Number of waypoints not yet consumed
    #[inline]
    pub fn remaining(&self) -> usize {
        self.waypoints.len() - self.cursor
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed waypoints, front first
    pub fn pending(&self) -> &[Vec2] {
        &self.waypoints[self.cursor..]
    }

    pub fn curve(&self) -> Option<&ControlCurve> {
        self.curve.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower_with_curve() -> PathFollower {
        let mut path = PathFollower::new();
        path.set_curve(Vec2::ZERO, Vec2::new(150.0, 0.0), Vec2::new(300.0, 0.0));
        path
    }

    #[test]
    fn test_generate_without_curve() {
        let mut path = PathFollower::new();
        assert_eq!(path.generate_path(10), Err(PathError::NoCurve));
        assert!(path.is_exhausted());
    }

    #[test]
    fn test_generate_zero_samples() {
        let mut path = follower_with_curve();
        assert_eq!(path.generate_path(0), Err(PathError::ZeroSamples));
    }

    #[test]
    fn test_exactly_n_waypoints_then_exhausted() {
        let mut path = follower_with_curve();
        let n = 12;
        assert_eq!(path.generate_path(n), Ok(n));
        assert_eq!(path.remaining(), n);

        for _ in 0..n {
            assert!(path.advance().is_ok());
        }
        assert_eq!(path.advance(), Err(PathError::Exhausted));
        assert!(path.is_exhausted());
    }

    #[test]
    fn test_first_sample_dropped_last_is_end() {
        let mut path = follower_with_curve();
        path.generate_path(3).unwrap();
        let first = path.advance().unwrap();
        assert!((first.x - 100.0).abs() < 1e-3);
        path.advance().unwrap();
        assert_eq!(path.advance().unwrap(), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_set_curve_replaces_queue() {
        let mut path = follower_with_curve();
        path.generate_path(5).unwrap();
        path.advance().unwrap();

        path.set_curve(Vec2::ZERO, Vec2::new(0.0, 50.0), Vec2::new(0.0, 100.0));
        assert!(path.is_exhausted());
        assert_eq!(path.advance(), Err(PathError::Exhausted));

        path.generate_path(4).unwrap();
        assert_eq!(path.pending().len(), 4);
        assert_eq!(*path.pending().last().unwrap(), Vec2::new(0.0, 100.0));
    }
}
