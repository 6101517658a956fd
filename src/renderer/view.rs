//! Maps battle snapshots onto retained primitives
//!
//! Each actor gets a sprite, a draggable marker square, two wedge boundary
//! lines, the wedge arc and its flight curve. Each spear in flight gets a
//! sprite. Views are created on first sight and removed once the simulation
//! no longer reports them.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::{Handle, RenderSink};
use crate::Settings;
use crate::sim::{ActorId, ActorSnapshot, BattleState, ControlCurve, Projectile, ProjectileId, Side};

/// Dragon art faces up; simulation angle 0 faces +x
const SPRITE_ROTATION_OFFSET: f32 = FRAC_PI_2;

const FOV_COLOR: u32 = 0xFF0000;
const PATH_COLOR: u32 = 0xFF00FF;
/// Divisions used when drawing a flight curve
const CURVE_SEGMENTS: usize = 32;

#[derive(Debug, Clone, Copy)]
struct ActorView {
    body: Handle,
    marker: Handle,
    fov_lower: Handle,
    fov_upper: Handle,
    fov_arc: Handle,
    curve: Handle,
}

impl ActorView {
    fn create(
        sink: &mut dyn RenderSink,
        snapshot: &ActorSnapshot,
        side: Side,
        settings: &Settings,
    ) -> Self {
        let texture = match side {
            Side::Player => "dragon",
            Side::Enemy => "dragon_enemy",
        };
        let wedge = &snapshot.wedge;
        let fov_alpha = settings.effective_fov_alpha();

        let view = Self {
            body: sink.add_sprite(
                texture,
                snapshot.position,
                snapshot.rotation + SPRITE_ROTATION_OFFSET,
                settings.sprite_scale,
            ),
            marker: sink.add_sprite("square", snapshot.marker, 0.0, 1.0),
            fov_lower: sink.add_line(wedge.origin, wedge.lower_edge(), FOV_COLOR, fov_alpha),
            fov_upper: sink.add_line(wedge.origin, wedge.upper_edge(), FOV_COLOR, fov_alpha),
            fov_arc: sink.add_arc(
                wedge.origin,
                wedge.range,
                wedge.lower,
                wedge.upper,
                FOV_COLOR,
                fov_alpha,
            ),
            curve: sink.add_polyline(
                curve_points(snapshot.curve.as_ref()),
                PATH_COLOR,
                settings.effective_path_alpha(),
            ),
        };
        // Enemy markers are not draggable, so keep them out of sight
        if side == Side::Enemy {
            sink.set_alpha(view.marker, 0.0);
        }
        view
    }

    fn apply(&self, sink: &mut dyn RenderSink, snapshot: &ActorSnapshot, settings: &Settings) {
        let wedge = &snapshot.wedge;
        let fov_alpha = settings.effective_fov_alpha();

        sink.set_position(self.body, snapshot.position);
        sink.set_rotation(self.body, snapshot.rotation + SPRITE_ROTATION_OFFSET);
        sink.set_position(self.marker, snapshot.marker);

        sink.set_line(self.fov_lower, wedge.origin, wedge.lower_edge());
        sink.set_line(self.fov_upper, wedge.origin, wedge.upper_edge());
        sink.set_arc(self.fov_arc, wedge.origin, wedge.range, wedge.lower, wedge.upper);
        for handle in [self.fov_lower, self.fov_upper, self.fov_arc] {
            sink.set_alpha(handle, fov_alpha);
        }

        sink.set_points(self.curve, curve_points(snapshot.curve.as_ref()));
        sink.set_alpha(self.curve, settings.effective_path_alpha());
    }

    fn destroy(&self, sink: &mut dyn RenderSink) {
        for handle in [
            self.body,
            self.marker,
            self.fov_lower,
            self.fov_upper,
            self.fov_arc,
            self.curve,
        ] {
            sink.remove(handle);
        }
    }
}

fn curve_points(curve: Option<&ControlCurve>) -> Vec<Vec2> {
    curve.map(|c| c.sample(CURVE_SEGMENTS)).unwrap_or_default()
}

/// Keeps the sink in step with a battle
#[derive(Debug, Default)]
pub struct BattleView {
    actors: BTreeMap<ActorId, ActorView>,
    spears: BTreeMap<ProjectileId, Handle>,
}

impl BattleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create, update and remove primitives to match `state`
    pub fn sync(&mut self, sink: &mut dyn RenderSink, state: &BattleState, settings: &Settings) {
        let tuning = state.tuning();

        for combatant in state.combatants() {
            let snapshot = combatant.actor.snapshot(tuning);
            match self.actors.get(&snapshot.id) {
                Some(view) => view.apply(sink, &snapshot, settings),
                None => {
                    let view = ActorView::create(sink, &snapshot, combatant.side, settings);
                    self.actors.insert(snapshot.id, view);
                }
            }
        }
        self.actors.retain(|id, view| {
            let alive = state.combatant(*id).is_some();
            if !alive {
                view.destroy(sink);
            }
            alive
        });

        for projectile in state.projectiles() {
            self.sync_spear(sink, projectile);
        }
        self.spears.retain(|id, handle| {
            let in_flight = state.projectiles().iter().any(|p| p.id == *id);
            if !in_flight {
                sink.remove(*handle);
            }
            in_flight
        });
    }

    /// Number of actors currently drawn
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of spears currently drawn
    pub fn spear_count(&self) -> usize {
        self.spears.len()
    }

    fn sync_spear(&mut self, sink: &mut dyn RenderSink, projectile: &Projectile) {
        match self.spears.get(&projectile.id) {
            Some(handle) => sink.set_position(*handle, projectile.position()),
            None => {
                let handle =
                    sink.add_sprite("spear", projectile.position(), projectile.rotation(), 1.0);
                self.spears.insert(projectile.id, handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DisplayList, Primitive};
    use crate::sim::{TickInput, tick};
    use crate::tuning::CombatTuning;

    fn duel() -> (BattleState, ActorId, ActorId) {
        let mut state = BattleState::new(5, CombatTuning::default()).unwrap();
        let player = state.spawn(Side::Player, Vec2::ZERO, 0.0);
        let enemy = state.spawn(Side::Enemy, Vec2::new(400.0, 0.0), std::f32::consts::PI);
        (state, player, enemy)
    }

    fn body_rotation(list: &DisplayList, texture: &str) -> Option<f32> {
        list.iter().find_map(|(_, p)| match p {
            Primitive::Sprite {
                texture: t,
                rotation,
                ..
            } if *t == texture => Some(*rotation),
            _ => None,
        })
    }

    #[test]
    fn test_sync_creates_actor_primitives() {
        let (state, _, _) = duel();
        let mut list = DisplayList::new();
        let mut view = BattleView::new();
        view.sync(&mut list, &state, &Settings::default());

        assert_eq!(view.actor_count(), 2);
        assert_eq!(list.len(), 12);
        // Facing +x is drawn with the art's offset
        let rotation = body_rotation(&list, "dragon").unwrap();
        assert!((rotation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_sync_follows_movement_and_hides_overlays() {
        let (mut state, player, _) = duel();
        let mut list = DisplayList::new();
        let mut view = BattleView::new();
        let mut settings = Settings::default();
        view.sync(&mut list, &state, &settings);

        tick(&mut state, &TickInput::default());
        settings.show_field_of_view = false;
        view.sync(&mut list, &state, &settings);

        let expected = state.combatant(player).unwrap().actor.position();
        let body = list.iter().find_map(|(_, p)| match p {
            Primitive::Sprite {
                texture: "dragon",
                position,
                ..
            } => Some(*position),
            _ => None,
        });
        assert_eq!(body, Some(expected));
        assert!(list.iter().all(|(_, p)| match p {
            Primitive::Line { alpha, .. } | Primitive::Arc { alpha, .. } => *alpha == 0.0,
            _ => true,
        }));
    }

    #[test]
    fn test_spears_and_removed_actors_are_cleaned_up() {
        let (mut state, _, enemy) = duel();
        let mut list = DisplayList::new();
        let mut view = BattleView::new();
        let settings = Settings::default();

        // Both dragons see each other and throw on the first tick
        tick(&mut state, &TickInput::default());
        view.sync(&mut list, &state, &settings);
        assert_eq!(view.spear_count(), 2);
        assert_eq!(list.len(), 14);

        state.remove(enemy);
        view.sync(&mut list, &state, &settings);
        assert_eq!(view.actor_count(), 1);
        // The spear aimed at the enemy fizzled
        assert_eq!(view.spear_count(), 1);
        assert_eq!(list.len(), 7);
    }
}
