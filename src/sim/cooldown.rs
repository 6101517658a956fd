//! Attack cooldown counter

use serde::{Deserialize, Serialize};

/// Per-actor tick counter gating attacks
///
/// Counts down by one per tick and never goes below zero. Attacks are only
/// allowed once it reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTimer {
    remaining: u32,
}

impl CombatTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick
    #[inline]
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    #[inline]
    pub fn can_attack(&self) -> bool {
        self.remaining == 0
    }

    /// Block attacks for the next `duration` ticks
    #[inline]
    pub fn start_cooldown(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Ticks left before the next attack is allowed
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
