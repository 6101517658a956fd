//! Field-of-view targeting and the attack decision
//!
//! An actor may strike a target only when the target sits inside its
//! forward wedge (angle AND range) and its cooldown has run out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::wedge::Wedge;
use crate::tuning::CombatTuning;

/// Another actor as seen by an attacker this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: ActorId,
    pub position: Vec2,
}

/// A successful attack decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub attacker: ActorId,
    pub target: ActorId,
    /// Attacker position when the attack was made
    pub from: Vec2,
    /// Target position when the attack was made
    pub to: Vec2,
}

/// Field-of-view wedge for the actor's current position and facing
pub fn compute_wedge(actor: &Actor, tuning: &CombatTuning) -> Wedge {
    Wedge::new(
        actor.center(),
        actor.rotation(),
        tuning.fov_half_angle(),
        tuning.fov_range,
    )
}

/// Check if `target_point` is inside the actor's wedge (angle and range)
pub fn is_in_range(actor: &Actor, target_point: Vec2, tuning: &CombatTuning) -> bool {
    compute_wedge(actor, tuning).contains_point(target_point)
}

/// Decide whether `attacker` strikes `target` this tick
///
/// Starts the attacker's cooldown only when an attack is returned.
pub fn evaluate_attack(
    attacker: &mut Actor,
    target: Target,
    tuning: &CombatTuning,
) -> Option<AttackEvent> {
    if !attacker.cooldown().can_attack() || !is_in_range(attacker, target.position, tuning) {
        return None;
    }

    let from = attacker.center();
    log::debug!(
        "actor {} attacks {} at ({:.1}, {:.1}) from ({:.1}, {:.1}) facing {:.3}",
        attacker.id().0,
        target.id.0,
        target.position.x,
        target.position.y,
        from.x,
        from.y,
        attacker.rotation()
    );

    attacker
        .cooldown_mut()
        .start_cooldown(tuning.cooldown_duration());

    Some(AttackEvent {
        attacker: attacker.id(),
        target: target.id,
        from,
        to: target.position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    fn attacker_at_origin(tuning: &CombatTuning) -> Actor {
        Actor::new(ActorId(1), Vec2::ZERO, 0.0, tuning)
    }

    fn target_at(x: f32, y: f32) -> Target {
        Target {
            id: ActorId(2),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_compute_wedge_follows_facing() {
        let tuning = CombatTuning::default();
        let actor = Actor::new(ActorId(1), Vec2::new(10.0, 20.0), 1.0, &tuning);
        let wedge = compute_wedge(&actor, &tuning);
        assert_eq!(wedge.origin, Vec2::new(10.0, 20.0));
        assert!((wedge.lower - (1.0 - 30f32.to_radians())).abs() < 1e-6);
        assert!((wedge.upper - (1.0 + 30f32.to_radians())).abs() < 1e-6);
        assert_eq!(wedge.range, 450.0);
    }

    #[test]
    fn test_is_in_range_requires_angle_and_distance() {
        let tuning = CombatTuning::default();
        let actor = attacker_at_origin(&tuning);
        assert!(is_in_range(&actor, Vec2::new(400.0, 0.0), &tuning));
        // Outside the angular wedge
        assert!(!is_in_range(&actor, Vec2::new(0.0, 400.0), &tuning));
        // Outside the range
        assert!(!is_in_range(&actor, Vec2::new(1000.0, 0.0), &tuning));
        // Exactly at range
        assert!(is_in_range(&actor, Vec2::new(450.0, 0.0), &tuning));
    }

    #[test]
    fn test_half_turn_wedge_sees_every_direction() {
        let tuning = CombatTuning {
            fov_half_angle_deg: 180.0,
            ..Default::default()
        };
        tuning.validate().unwrap();
        let points = [
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(-100.0, 0.0),
            Vec2::new(0.0, -100.0),
        ];
        for i in 0..3600 {
            let facing = -PI + i as f32 * TAU / 3600.0;
            let actor = Actor::new(ActorId(1), Vec2::ZERO, facing, &tuning);
            for point in points {
                assert!(
                    is_in_range(&actor, point, &tuning),
                    "facing {} missed {:?}",
                    facing,
                    point
                );
            }
        }
    }

    #[test]
    fn test_is_in_range_uses_configured_wedge() {
        let tuning = CombatTuning {
            fov_half_angle_deg: 60.0,
            fov_range: 1200.0,
            ..Default::default()
        };
        let actor = attacker_at_origin(&tuning);
        assert!(is_in_range(&actor, Vec2::new(1000.0, 0.0), &tuning));
        // 45° is outside ±30° but inside ±60°
        assert!(is_in_range(&actor, Vec2::new(300.0, 300.0), &tuning));
    }

    #[test]
    fn test_evaluate_attack_starts_cooldown() {
        let tuning = CombatTuning::default();
        let mut actor = attacker_at_origin(&tuning);

        let event = evaluate_attack(&mut actor, target_at(400.0, 0.0), &tuning).unwrap();
        assert_eq!(event.attacker, ActorId(1));
        assert_eq!(event.target, ActorId(2));
        assert_eq!(event.from, Vec2::ZERO);
        assert_eq!(event.to, Vec2::new(400.0, 0.0));
        assert_eq!(actor.cooldown().remaining(), 30);
    }

    #[test]
    fn test_evaluate_attack_out_of_range_keeps_cooldown() {
        let tuning = CombatTuning::default();
        let mut actor = attacker_at_origin(&tuning);
        assert!(evaluate_attack(&mut actor, target_at(0.0, 400.0), &tuning).is_none());
        assert!(actor.cooldown().can_attack());
    }

    #[test]
    fn test_attack_cadence() {
        let tuning = CombatTuning::default();
        let mut actor = attacker_at_origin(&tuning);
        let target = target_at(400.0, 0.0);

        let mut attack_ticks = Vec::new();
        for tick in 1..=61 {
            actor.cooldown_mut().tick();
            if evaluate_attack(&mut actor, target, &tuning).is_some() {
                attack_ticks.push(tick);
            }
        }
        // One attack, 29 silent ticks, then again on tick 31
        assert_eq!(attack_ticks, vec![1, 31, 61]);
    }
}
