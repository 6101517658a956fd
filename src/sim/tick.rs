//! Fixed timestep simulation tick
//!
//! Core battle loop that advances the simulation deterministically. Host
//! input is buffered in a `TickInput` and only applied at the start of a
//! tick, so a tick never sees a half-applied drag.

use glam::Vec2;

use super::actor::ActorId;
use super::state::{BattleEvent, BattlePhase, BattleState, Side};

/// One host input event, already resolved to an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer grabbed `actor`'s marker
    DragStart { actor: ActorId, at: Vec2 },
    /// Pointer moved while holding the marker
    Drag { actor: ActorId, at: Vec2 },
    /// Pointer released the marker
    DragEnd { actor: ActorId, at: Vec2 },
    /// Pointer pressed on `actor`
    PointerDown { actor: ActorId },
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Buffered events, applied in arrival order
    pub events: Vec<InputEvent>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the battle by one fixed timestep
///
/// Order within a tick: input, then every actor moves, then spears in flight
/// advance, then every surviving actor targets from its new position.
pub fn tick(state: &mut BattleState, input: &TickInput) -> Vec<BattleEvent> {
    if input.pause {
        state.phase = match state.phase {
            BattlePhase::Running => BattlePhase::Paused,
            BattlePhase::Paused => BattlePhase::Running,
        };
        log::info!("battle {:?}", state.phase);
    }

    // Markers can be dragged while paused to plan the next move
    for event in &input.events {
        apply_input(state, *event);
    }

    if state.phase == BattlePhase::Paused {
        return state.take_events();
    }

    state.time_ticks += 1;
    let tuning = state.tuning().clone();
    let ids = state.actor_ids();

    // Movement
    for &id in &ids {
        let pursuit = pursuit_target(state, id);
        let Some(combatant) = state.combatant_mut(id) else {
            continue;
        };
        if let Some(point) = pursuit {
            combatant.actor.steer_to(point, &tuning);
            state.push_event(BattleEvent::PathReseeded { actor: id });
        }

        let Some(combatant) = state.combatant_mut(id) else {
            continue;
        };
        if combatant.actor.advance(&tuning).reseeked {
            state.push_event(BattleEvent::PathReseeded { actor: id });
        }
    }

    // Spears already in flight resolve before new ones are thrown
    state.advance_projectiles();

    // Targeting, from this tick's positions
    for &id in &ids {
        let opponent = state.opponent_for(id);
        let Some(combatant) = state.combatant_mut(id) else {
            continue;
        };
        if let Some(attack) = combatant.actor.engage(opponent, &tuning) {
            state.launch(attack);
        }
    }

    state.take_events()
}

/// Enemies whose path ran out chase their opponent instead of idling ahead
fn pursuit_target(state: &BattleState, id: ActorId) -> Option<Vec2> {
    let combatant = state.combatant(id)?;
    let actor = &combatant.actor;
    if combatant.side != Side::Enemy || actor.is_dragging() || !actor.path().is_exhausted() {
        return None;
    }
    state.opponent_for(id).map(|target| target.position)
}

fn apply_input(state: &mut BattleState, event: InputEvent) {
    let tuning = state.tuning().clone();
    match event {
        InputEvent::DragStart { actor, at } => {
            if let Some(c) = state.combatant_mut(actor) {
                c.actor.begin_drag(at);
            }
        }
        InputEvent::Drag { actor, at } => {
            if let Some(c) = state.combatant_mut(actor) {
                c.actor.drag_to(at, &tuning);
            }
        }
        InputEvent::DragEnd { actor, at } => {
            if let Some(c) = state.combatant_mut(actor) {
                c.actor.end_drag(at, &tuning);
            }
        }
        InputEvent::PointerDown { actor } => state.click(actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ActorMode;
    use crate::tuning::CombatTuning;
    use std::f32::consts::PI;

    fn duel(tuning: CombatTuning) -> (BattleState, ActorId, ActorId) {
        let mut state = BattleState::new(12345, tuning).unwrap();
        let player = state.spawn(Side::Player, Vec2::ZERO, 0.0);
        let enemy = state.spawn(Side::Enemy, Vec2::new(400.0, 0.0), PI);
        (state, player, enemy)
    }

    fn count_launches(events: &[BattleEvent], attacker: ActorId) -> usize {
        events
            .iter()
            .filter(|e| match e {
                BattleEvent::AttackLaunched { attack, .. } => attack.attacker == attacker,
                _ => false,
            })
            .count()
    }

    #[test]
    fn test_tick_pause() {
        let (mut state, _, _) = duel(CombatTuning::default());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, BattlePhase::Paused);

        // Nothing moves while paused
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause);
        assert_eq!(state.phase, BattlePhase::Running);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_facing_dragons_trade_attacks() {
        let (mut state, player, enemy) = duel(CombatTuning::default());
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(count_launches(&events, player), 1);
        assert_eq!(count_launches(&events, enemy), 1);
        assert_eq!(state.projectiles().len(), 2);

        // Cooldown keeps both quiet until tick 31
        let mut launches = 0;
        for _ in 2..=30 {
            let events = tick(&mut state, &TickInput::default());
            launches += count_launches(&events, player) + count_launches(&events, enemy);
        }
        assert_eq!(launches, 0);
    }

    #[test]
    fn test_spears_land_after_flight() {
        let (mut state, player, enemy) = duel(CombatTuning::default());
        tick(&mut state, &TickInput::default());

        let mut landed = Vec::new();
        for _ in 0..21 {
            for event in tick(&mut state, &TickInput::default()) {
                if let BattleEvent::ProjectileLanded {
                    target,
                    remaining_hp,
                    ..
                } = event
                {
                    landed.push((target, remaining_hp));
                }
            }
        }
        landed.sort_by_key(|(id, _)| *id);
        assert_eq!(landed, vec![(player, 90), (enemy, 90)]);
    }

    #[test]
    fn test_defeat_removes_combatant() {
        let tuning = CombatTuning {
            starting_hp: 10,
            attack_damage: 10,
            projectile_flight_ticks: 1,
            ..Default::default()
        };
        let (mut state, player, enemy) = duel(tuning);

        // Tick 1 launches both spears, tick 2 lands them
        tick(&mut state, &TickInput::default());
        let events = tick(&mut state, &TickInput::default());

        assert!(events.contains(&BattleEvent::ActorDefeated {
            actor: enemy,
            by: player
        }));
        assert!(state.combatant(enemy).is_none());
        // Both spears were already in flight, so both land
        assert!(state.combatant(player).is_none());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_drag_input_applied_at_tick() {
        let (mut state, player, _) = duel(CombatTuning::default());
        let target = Vec2::new(0.0, 300.0);

        let input = TickInput {
            events: vec![
                InputEvent::DragStart {
                    actor: player,
                    at: Vec2::new(300.0, 0.0),
                },
                InputEvent::Drag {
                    actor: player,
                    at: Vec2::new(100.0, 200.0),
                },
            ],
            pause: false,
        };
        tick(&mut state, &input);
        let actor = &state.combatant(player).unwrap().actor;
        assert!(matches!(actor.mode(), ActorMode::Dragging { .. }));
        assert_eq!(actor.position(), Vec2::ZERO);

        let release = TickInput {
            events: vec![InputEvent::DragEnd {
                actor: player,
                at: target,
            }],
            pause: false,
        };
        tick(&mut state, &release);
        let actor = &state.combatant(player).unwrap().actor;
        assert_eq!(actor.mode(), ActorMode::Seeking);
        assert_eq!(actor.marker(), target);
        assert_eq!(actor.path().curve().unwrap().end, target);
        // Already took the first step of the new path
        assert_eq!(actor.path().remaining(), 119);
    }

    #[test]
    fn test_pointer_down_selects_target() {
        let mut state = BattleState::new(3, CombatTuning::default()).unwrap();
        let (player, enemy) = state.spawn_skirmish();
        let input = TickInput {
            events: vec![InputEvent::PointerDown { actor: enemy }],
            pause: false,
        };
        let events = tick(&mut state, &input);
        assert!(events.contains(&BattleEvent::TargetSelected {
            attacker: player,
            target: enemy
        }));
    }

    #[test]
    fn test_enemy_pursues_when_path_runs_out() {
        let tuning = CombatTuning {
            path_samples: 4,
            ..Default::default()
        };
        let mut state = BattleState::new(1, tuning).unwrap();
        let player = state.spawn(Side::Player, Vec2::new(0.0, 1000.0), 0.0);
        let enemy = state.spawn(Side::Enemy, Vec2::ZERO, 0.0);

        let mut reseeds = 0;
        for _ in 0..5 {
            for event in tick(&mut state, &TickInput::default()) {
                if event == (BattleEvent::PathReseeded { actor: enemy }) {
                    reseeds += 1;
                }
            }
        }
        assert_eq!(reseeds, 1);
        let enemy_actor = &state.combatant(enemy).unwrap().actor;
        let player_pos = state.combatant(player).unwrap().actor.position();
        // The new curve ends where the player was when it was planned
        let end = enemy_actor.path().curve().unwrap().end;
        assert!((end.y - player_pos.y).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = BattleState::new(99999, CombatTuning::default()).unwrap();
        let mut s2 = BattleState::new(99999, CombatTuning::default()).unwrap();
        s1.spawn_skirmish();
        s2.spawn_skirmish();

        let mut log1 = Vec::new();
        let mut log2 = Vec::new();
        for _ in 0..400 {
            log1.extend(tick(&mut s1, &TickInput::default()));
            log2.extend(tick(&mut s2, &TickInput::default()));
        }

        assert_eq!(log1, log2);
        assert_eq!(s1.time_ticks, s2.time_ticks);
        for (a, b) in s1.snapshots().iter().zip(s2.snapshots().iter()) {
            assert_eq!(a, b);
        }
    }
}
