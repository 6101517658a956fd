//! Combatant actor: position, facing, flight path and attack timing
//!
//! An actor is always in one of two modes:
//! - `Seeking`: consuming one waypoint per tick; when the queue runs dry it
//!   re-seeks a fresh idle target straight ahead and keeps going
//! - `Dragging`: its marker (the curve's end anchor) follows the pointer and
//!   the actor holds position until the drag ends
//!
//! There is no terminal mode. The battle state decides when an actor is gone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cooldown::CombatTimer;
use super::curve::ControlCurve;
use super::geometry::{angle_between, find_point_at_distance};
use super::path::{PathError, PathFollower};
use super::targeting::{AttackEvent, Target, compute_wedge, evaluate_attack};
use super::wedge::Wedge;
use crate::normalize_angle;
use crate::tuning::{CombatTuning, DragRegen, TuningError};

/// Stable actor identity (ordering is spawn order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Movement mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorMode {
    /// Following the waypoint queue
    Seeking,
    /// Marker held by the pointer
    Dragging { pointer: Vec2 },
}

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub position: Vec2,
    pub rotation: f32,
    /// The path ran out this tick and a new idle path was generated
    pub reseeked: bool,
}

/// Result of one full actor update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorUpdate {
    pub movement: Movement,
    pub attack: Option<AttackEvent>,
}

/// Plain render state for one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub position: Vec2,
    pub rotation: f32,
    pub marker: Vec2,
    pub wedge: Wedge,
    pub curve: Option<ControlCurve>,
    pub dragging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    position: Vec2,
    /// Facing (radians, normalized to [-π, π))
    rotation: f32,
    /// End anchor of the current curve
    marker: Vec2,
    cooldown: CombatTimer,
    path: PathFollower,
    mode: ActorMode,
}

impl Actor {
    /// Create an actor and start it seeking straight ahead
    ///
    /// `tuning` must already have passed `CombatTuning::validate`, as it has
    /// inside `BattleState`. Owners holding unchecked tuning use `try_new`.
    pub fn new(id: ActorId, position: Vec2, rotation: f32, tuning: &CombatTuning) -> Self {
        log::debug!(
            "creating actor {} at ({:.1}, {:.1}) facing {:.3}",
            id.0,
            position.x,
            position.y,
            rotation
        );
        let mut actor = Self {
            id,
            position,
            rotation: normalize_angle(rotation),
            marker: position,
            cooldown: CombatTimer::new(),
            path: PathFollower::new(),
            mode: ActorMode::Seeking,
        };
        actor.set_to_idle_mode(tuning);
        actor
    }

    /// Validate `tuning`, then create the actor
    pub fn try_new(
        id: ActorId,
        position: Vec2,
        rotation: f32,
        tuning: &CombatTuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::new(id, position, rotation, tuning))
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Center of the actor (targeting and curve origin)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn marker(&self) -> Vec2 {
        self.marker
    }

    #[inline]
    pub fn mode(&self) -> ActorMode {
        self.mode
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, ActorMode::Dragging { .. })
    }

    #[inline]
    pub fn cooldown(&self) -> &CombatTimer {
        &self.cooldown
    }

    #[inline]
    pub fn cooldown_mut(&mut self) -> &mut CombatTimer {
        &mut self.cooldown
    }

    #[inline]
    pub fn path(&self) -> &PathFollower {
        &self.path
    }

    /// Aim a fresh path at a point straight ahead along the current facing
    pub fn set_to_idle_mode(&mut self, tuning: &CombatTuning) {
        let ahead = find_point_at_distance(self.center(), self.rotation, tuning.idle_seek_distance);
        self.steer_to(ahead, tuning);
    }

    /// Aim a fresh path at `end`, bending out of the current facing
    pub fn steer_to(&mut self, end: Vec2, tuning: &CombatTuning) {
        self.marker = end;
        self.rebuild_curve(end, tuning);
        if let Err(e) = self.path.generate_path(tuning.path_samples) {
            log::warn!("actor {} could not generate a path: {}", self.id.0, e);
        }
    }

    /// Start dragging the marker
    pub fn begin_drag(&mut self, at: Vec2) {
        log::debug!("actor {} drag start at ({:.1}, {:.1})", self.id.0, at.x, at.y);
        self.mode = ActorMode::Dragging { pointer: at };
        self.marker = at;
    }

    /// Move the dragged marker; returns false when no drag is in progress
    pub fn drag_to(&mut self, at: Vec2, tuning: &CombatTuning) -> bool {
        if !self.is_dragging() {
            log::warn!("actor {} received drag without drag start", self.id.0);
            return false;
        }
        self.mode = ActorMode::Dragging { pointer: at };
        self.marker = at;
        if tuning.drag_regen == DragRegen::EveryMove {
            self.rebuild_curve(at, tuning);
        }
        true
    }

    /// Release the marker and fly toward it; returns false when no drag is in progress
    pub fn end_drag(&mut self, at: Vec2, tuning: &CombatTuning) -> bool {
        if !self.is_dragging() {
            log::warn!("actor {} received drag end without drag start", self.id.0);
            return false;
        }
        log::debug!("actor {} drag end at ({:.1}, {:.1})", self.id.0, at.x, at.y);
        self.mode = ActorMode::Seeking;
        self.steer_to(at, tuning);
        true
    }

    /// Move one waypoint along the path, re-seeking when it runs out
    pub fn advance(&mut self, tuning: &CombatTuning) -> Movement {
        if self.is_dragging() {
            return self.movement(false);
        }

        let mut reseeked = false;
        let next = match self.path.advance() {
            Ok(point) => point,
            Err(PathError::Exhausted) => {
                log::debug!("actor {} path exhausted, re-seeking", self.id.0);
                self.set_to_idle_mode(tuning);
                reseeked = true;
                match self.path.advance() {
                    Ok(point) => point,
                    Err(e) => {
                        log::warn!("actor {} has no path after re-seek: {}", self.id.0, e);
                        return self.movement(reseeked);
                    }
                }
            }
            Err(e) => {
                log::warn!("actor {} path error: {}", self.id.0, e);
                return self.movement(reseeked);
            }
        };

        // A zero-length step keeps the current facing
        if next != self.position {
            self.rotation = normalize_angle(angle_between(self.position, next));
        }
        self.position = next;

        self.movement(reseeked)
    }

    /// Tick the cooldown, then try to attack `target`
    pub fn engage(&mut self, target: Option<Target>, tuning: &CombatTuning) -> Option<AttackEvent> {
        self.cooldown.tick();
        target.and_then(|target| evaluate_attack(self, target, tuning))
    }

    /// Full per-tick update: move first, then target from the new position
    pub fn update(&mut self, opponent: Option<Target>, tuning: &CombatTuning) -> ActorUpdate {
        let movement = self.advance(tuning);
        let attack = self.engage(opponent, tuning);
        ActorUpdate { movement, attack }
    }

    /// This actor as a target for others
    pub fn as_target(&self) -> Target {
        Target {
            id: self.id,
            position: self.center(),
        }
    }

    pub fn snapshot(&self, tuning: &CombatTuning) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            position: self.position,
            rotation: self.rotation,
            marker: self.marker,
            wedge: compute_wedge(self, tuning),
            curve: self.path.curve().copied(),
            dragging: self.is_dragging(),
        }
    }

    fn rebuild_curve(&mut self, end: Vec2, tuning: &CombatTuning) {
        let center = self.center();
        let control =
            find_point_at_distance(center, self.rotation, tuning.control_point_distance);
        self.path.set_curve(center, control, end);
    }

    fn movement(&self, reseeked: bool) -> Movement {
        Movement {
            position: self.position,
            rotation: self.rotation,
            reseeked,
        }
    }
}
