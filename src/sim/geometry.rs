//! Planar geometry helpers shared by targeting, paths and rendering
//!
//! Angles are radians measured with `atan2`, so 0 points along +x and the
//! result is continuous through all four quadrants.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::normalize_angle;

/// Slack for spans built as `facing ± half_angle`, which can round a ulp or
/// two short of a full turn
const FULL_TURN_EPSILON: f32 = 1e-5;

/// Angle of the vector `from -> to` (0 for a zero-length vector)
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta == Vec2::ZERO {
        return 0.0;
    }
    delta.y.atan2(delta.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance_between(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Point `distance` away from `origin` along `angle`
#[inline]
pub fn find_point_at_distance(origin: Vec2, angle: f32, distance: f32) -> Vec2 {
    origin + Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Check if `theta` lies in the inclusive interval `[lower, upper]`
///
/// Bounds may be given unnormalized (e.g. `facing ± half_angle`). When the
/// normalized lower bound is greater than the normalized upper bound the
/// interval crosses the ±π seam (170° to -170° covers 180°). An interval
/// spanning a full turn or more contains everything.
pub fn angle_within(theta: f32, lower: f32, upper: f32) -> bool {
    if upper - lower >= TAU - FULL_TURN_EPSILON {
        return true;
    }

    let theta = normalize_angle(theta);
    let start = normalize_angle(lower);
    let end = normalize_angle(upper);

    if start <= end {
        theta >= start && theta <= end
    } else {
        theta >= start || theta <= end
    }
}

/// Check if the direction from `origin` to `point` lies within `[lower, upper]`
#[inline]
pub fn point_is_within_angle(origin: Vec2, point: Vec2, lower: f32, upper: f32) -> bool {
    angle_within(angle_between(origin, point), lower, upper)
}
