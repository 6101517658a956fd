//! Data-driven game balance
//!
//! Everything that decides how a fight plays out (wedge size, attack rate,
//! path shape, damage) lives here so it can be loaded from JSON and tweaked
//! without touching simulation code. Values are validated once, when a
//! battle is constructed, and rejected rather than clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the path curve reacts while a marker is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragRegen {
    /// Rebuild the curve on every pointer move (live preview)
    #[default]
    EveryMove,
    /// Only rebuild the curve when the drag ends
    OnRelease,
}

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("field of view half-angle must be in (0, 180] degrees, got {0}")]
    HalfAngle(f32),
    #[error("field of view range must be positive and finite, got {0}")]
    Range(f32),
    #[error("attack cooldown must not be negative, got {0} ticks")]
    Cooldown(i64),
    #[error("{name} must be positive and finite, got {value}")]
    Distance { name: &'static str, value: f32 },
    #[error("path must have at least one sample per curve")]
    PathSamples,
    #[error("projectile flight must last at least one tick")]
    FlightTicks,
    #[error("starting hp must be at least 1")]
    StartingHp,
    #[error("invalid tuning json: {0}")]
    Parse(String),
}

/// Combat balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Half-angle of the field-of-view wedge (degrees)
    pub fov_half_angle_deg: f32,
    /// Reach of the field-of-view wedge (world units)
    pub fov_range: f32,
    /// Ticks between attacks
    pub attack_cooldown_ticks: i64,
    /// Distance ahead of the actor where an idle path ends
    pub idle_seek_distance: f32,
    /// Distance ahead of the actor of the curve's control point
    pub control_point_distance: f32,
    /// Waypoints per generated path (one consumed per tick)
    pub path_samples: usize,
    /// Curve regeneration policy while dragging
    pub drag_regen: DragRegen,
    /// Ticks a spear takes to reach its target
    pub projectile_flight_ticks: u32,
    /// HP removed per landed spear
    pub attack_damage: u32,
    /// HP a combatant spawns with
    pub starting_hp: u32,
    /// Pointer hit radius for actors and markers
    pub hit_radius: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            fov_half_angle_deg: 30.0,
            fov_range: 450.0,
            attack_cooldown_ticks: 30,
            idle_seek_distance: 300.0,
            control_point_distance: 150.0,
            path_samples: 120,
            drag_regen: DragRegen::EveryMove,
            // 350 ms at 60 Hz
            projectile_flight_ticks: 21,
            attack_damage: 10,
            starting_hp: 100,
            hit_radius: 48.0,
        }
    }
}

impl CombatTuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value, reporting the first one out of bounds
    pub fn validate(&self) -> Result<(), TuningError> {
        let half = self.fov_half_angle_deg;
        if !half.is_finite() || half <= 0.0 || half > 180.0 {
            return Err(TuningError::HalfAngle(half));
        }
        if !self.fov_range.is_finite() || self.fov_range <= 0.0 {
            return Err(TuningError::Range(self.fov_range));
        }
        if self.attack_cooldown_ticks < 0 || self.attack_cooldown_ticks > u32::MAX as i64 {
            return Err(TuningError::Cooldown(self.attack_cooldown_ticks));
        }
        for (name, value) in [
            ("idle_seek_distance", self.idle_seek_distance),
            ("control_point_distance", self.control_point_distance),
            ("hit_radius", self.hit_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Distance { name, value });
            }
        }
        if self.path_samples == 0 {
            return Err(TuningError::PathSamples);
        }
        if self.projectile_flight_ticks == 0 {
            return Err(TuningError::FlightTicks);
        }
        if self.starting_hp == 0 {
            return Err(TuningError::StartingHp);
        }
        Ok(())
    }

    /// Half-angle of the wedge in radians
    #[inline]
    pub fn fov_half_angle(&self) -> f32 {
        self.fov_half_angle_deg.to_radians()
    }

    /// Cooldown as a timer duration (valid after `validate`)
    #[inline]
    pub fn cooldown_duration(&self) -> u32 {
        self.attack_cooldown_ticks.clamp(0, u32::MAX as i64) as u32
    }
}
