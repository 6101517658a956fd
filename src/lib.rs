//! Dragon Skirmish - real-time dragon battles in the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, paths, targeting, battle state)
//! - `renderer`: Render adapter that turns simulation snapshots into primitives
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{CombatTuning, DragRegen, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one waypoint per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions used for skirmish placement
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(0.0)).abs() < 1e-6);
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - (-PI / 2.0)).abs() < 1e-6);
        assert!((normalize_angle(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        let a = normalize_angle(PI);
        assert!((-PI..PI).contains(&a));
    }

    #[test]
    fn test_normalize_angle_non_finite() {
        assert!(normalize_angle(f32::NAN).is_nan());
        assert!(normalize_angle(f32::INFINITY).is_nan());
    }
}
