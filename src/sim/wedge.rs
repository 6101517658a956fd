//! Field-of-view wedge geometry
//!
//! A wedge is the sector an actor can see and strike:
//! - origin: the actor's center
//! - lower, upper: angular bounds (radians, kept unnormalized so the span survives)
//! - range: radial reach

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{
    angle_within, distance_between, find_point_at_distance, point_is_within_angle,
};

/// A forward-facing sector with a fixed reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    /// Apex of the wedge
    pub origin: Vec2,
    /// Lower angular bound (radians)
    pub lower: f32,
    /// Upper angular bound (radians)
    pub upper: f32,
    /// Maximum distance from the origin
    pub range: f32,
}

impl Wedge {
    /// Wedge centred on `facing`, `half_angle` to each side
    pub fn new(origin: Vec2, facing: f32, half_angle: f32, range: f32) -> Self {
        Self {
            origin,
            lower: facing - half_angle,
            upper: facing + half_angle,
            range,
        }
    }

    /// Check if an angle is within the wedge's angular extent
    #[inline]
    pub fn contains_angle(&self, theta: f32) -> bool {
        angle_within(theta, self.lower, self.upper)
    }

    /// Check if a point is inside both the angular extent and the range
    pub fn contains_point(&self, point: Vec2) -> bool {
        point_is_within_angle(self.origin, point, self.lower, self.upper)
            && distance_between(self.origin, point) <= self.range
    }

    /// Far end of the lower boundary line
    pub fn lower_edge(&self) -> Vec2 {
        find_point_at_distance(self.origin, self.lower, self.range)
    }

    /// Far end of the upper boundary line
    pub fn upper_edge(&self) -> Vec2 {
        find_point_at_distance(self.origin, self.upper, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wedge_bounds() {
        let wedge = Wedge::new(Vec2::ZERO, 0.0, PI / 6.0, 450.0);
        assert!((wedge.lower + PI / 6.0).abs() < 1e-6);
        assert!((wedge.upper - PI / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_wedge_contains_angle_wraparound() {
        // Facing 180°, wedge spans 170° to 190° (-170°)
        let wedge = Wedge::new(Vec2::ZERO, PI, 10f32.to_radians(), 100.0);
        assert!(wedge.contains_angle(PI));
        assert!(wedge.contains_angle(-PI + 0.01));
        assert!(!wedge.contains_angle(0.0));
    }

    #[test]
    fn test_wedge_contains_point() {
        let wedge = Wedge::new(Vec2::new(100.0, 100.0), PI / 2.0, PI / 6.0, 200.0);
        assert!(wedge.contains_point(Vec2::new(100.0, 250.0)));
        // Right direction, too far
        assert!(!wedge.contains_point(Vec2::new(100.0, 301.0)));
        // In range, wrong direction
        assert!(!wedge.contains_point(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_edges_at_range() {
        let wedge = Wedge::new(Vec2::new(5.0, -5.0), 1.0, 0.4, 300.0);
        assert!((wedge.lower_edge().distance(wedge.origin) - 300.0).abs() < 1e-2);
        assert!((wedge.upper_edge().distance(wedge.origin) - 300.0).abs() < 1e-2);
    }
}
