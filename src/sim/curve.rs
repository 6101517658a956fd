//! Quadratic control curve for actor flight paths

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Three-point quadratic Bezier (start, control, end)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlCurve {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl ControlCurve {
    pub fn new(start: Vec2, control: Vec2, end: Vec2) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Point at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Sample `divisions + 1` points at evenly spaced parameters, endpoints included
    pub fn sample(&self, divisions: usize) -> Vec<Vec2> {
        if divisions == 0 {
            return vec![self.start];
        }
        (0..=divisions)
            .map(|i| {
                // Pin the last sample so the path ends exactly on the anchor
                if i == divisions {
                    self.end
                } else {
                    self.point_at(i as f32 / divisions as f32)
                }
            })
            .collect()
    }
}
