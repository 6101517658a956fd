//! Battle state: the scene that owns combatants, projectiles and HP
//!
//! Actors know nothing about health or each other. The battle state pairs
//! each actor with a side and HP, picks opponents, turns attack decisions
//! into spears in flight, and removes combatants when they are defeated.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorSnapshot};
use super::clicks::{ClickHandler, ClickRegistry, Command};
use super::geometry::{angle_between, distance_between};
use super::targeting::{AttackEvent, Target};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::tuning::{CombatTuning, TuningError};

/// Which team a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposes(self, other: Side) -> bool {
        self != other
    }
}

/// An actor taking part in the battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub actor: Actor,
    pub side: Side,
    pub hp: u32,
    /// Target picked by the player (falls back to the nearest enemy)
    pub focus: Option<ActorId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// A spear in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub attacker: ActorId,
    pub target: ActorId,
    pub from: Vec2,
    pub to: Vec2,
    pub elapsed_ticks: u32,
    pub flight_ticks: u32,
}

impl Projectile {
    /// Fraction of the flight completed (0-1)
    pub fn progress(&self) -> f32 {
        (self.elapsed_ticks as f32 / self.flight_ticks.max(1) as f32).min(1.0)
    }

    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress())
    }

    pub fn rotation(&self) -> f32 {
        angle_between(self.from, self.to)
    }
}

/// Current phase of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Running,
    Paused,
}

/// Things that happened during a tick, for the host and renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    AttackLaunched {
        projectile: ProjectileId,
        attack: AttackEvent,
    },
    ProjectileLanded {
        projectile: ProjectileId,
        attacker: ActorId,
        target: ActorId,
        remaining_hp: u32,
    },
    /// The target vanished before the spear arrived
    ProjectileFizzled {
        projectile: ProjectileId,
        attacker: ActorId,
        target: ActorId,
    },
    ActorDefeated {
        actor: ActorId,
        by: ActorId,
    },
    PathReseeded {
        actor: ActorId,
    },
    TargetSelected {
        attacker: ActorId,
        target: ActorId,
    },
    TargetCleared {
        attacker: ActorId,
    },
}

#[derive(Debug)]
pub struct BattleState {
    /// Battle seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: BattlePhase,
    tuning: CombatTuning,
    rng: Pcg32,
    /// Iterated in id order for determinism
    combatants: BTreeMap<ActorId, Combatant>,
    projectiles: Vec<Projectile>,
    clicks: ClickRegistry,
    /// Events raised since the last tick returned
    events: Vec<BattleEvent>,
    next_id: u32,
}

impl BattleState {
    /// Create an empty battle, rejecting invalid tuning
    pub fn new(seed: u64, tuning: CombatTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("new battle with seed {}", seed);
        Ok(Self {
            seed,
            time_ticks: 0,
            phase: BattlePhase::Running,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            combatants: BTreeMap::new(),
            projectiles: Vec::new(),
            clicks: ClickRegistry::new(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Allocate a new entity ID (shared by actors and projectiles)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a combatant at full HP
    pub fn spawn(&mut self, side: Side, position: Vec2, rotation: f32) -> ActorId {
        let id = ActorId(self.next_entity_id());
        let actor = Actor::new(id, position, rotation, &self.tuning);
        self.combatants.insert(
            id,
            Combatant {
                actor,
                side,
                hp: self.tuning.starting_hp,
                focus: None,
            },
        );
        log::info!("spawned {:?} actor {}", side, id.0);
        id
    }

    /// Place one player and one enemy facing each other
    ///
    /// Clicking the enemy focuses it; clicking the player drops the focus.
    pub fn spawn_skirmish(&mut self) -> (ActorId, ActorId) {
        let player_pos = Vec2::new(
            self.rng.random_range(0.1f32..0.25) * ARENA_WIDTH,
            self.rng.random_range(0.3f32..0.7) * ARENA_HEIGHT,
        );
        let enemy_pos = Vec2::new(
            self.rng.random_range(0.75f32..0.9) * ARENA_WIDTH,
            self.rng.random_range(0.3f32..0.7) * ARENA_HEIGHT,
        );

        let player = self.spawn(Side::Player, player_pos, angle_between(player_pos, enemy_pos));
        let enemy = self.spawn(Side::Enemy, enemy_pos, angle_between(enemy_pos, player_pos));

        self.register_click_handler(
            enemy,
            Box::new(move |clicked| {
                Some(Command::SelectTarget {
                    attacker: player,
                    target: clicked,
                })
            }),
        );
        self.register_click_handler(
            player,
            Box::new(move |_| Some(Command::ClearTarget { attacker: player })),
        );

        (player, enemy)
    }

    /// Remove a combatant, fizzling spears aimed at it
    pub fn remove(&mut self, id: ActorId) -> Option<Combatant> {
        let removed = self.combatants.remove(&id)?;
        self.clicks.deregister(id);

        let mut fizzled = Vec::new();
        self.projectiles.retain(|p| {
            if p.target == id {
                fizzled.push(*p);
                false
            } else {
                true
            }
        });
        for p in fizzled {
            self.events.push(BattleEvent::ProjectileFizzled {
                projectile: p.id,
                attacker: p.attacker,
                target: p.target,
            });
        }

        for combatant in self.combatants.values_mut() {
            if combatant.focus == Some(id) {
                combatant.focus = None;
            }
        }

        log::info!("removed actor {}", id.0);
        Some(removed)
    }

    pub fn combatant(&self, id: ActorId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn combatant_mut(&mut self, id: ActorId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.combatants.keys().copied().collect()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Render state for every actor
    pub fn snapshots(&self) -> Vec<ActorSnapshot> {
        self.combatants
            .values()
            .map(|c| c.actor.snapshot(&self.tuning))
            .collect()
    }

    /// Side left standing once the other has been wiped out
    pub fn winner(&self) -> Option<Side> {
        let mut sides = self.combatants.values().map(|c| c.side);
        let first = sides.next()?;
        sides.all(|s| s == first).then_some(first)
    }

    /// Nearest actor within the hit radius of `point`
    pub fn actor_at(&self, point: Vec2) -> Option<ActorId> {
        self.nearest_within(point, |c| Some(c.actor.center()))
    }

    /// Nearest marker belonging to `side` within the hit radius of `point`
    pub fn marker_at(&self, point: Vec2, side: Side) -> Option<ActorId> {
        self.nearest_within(point, |c| (c.side == side).then(|| c.actor.marker()))
    }

    pub fn register_click_handler(&mut self, actor: ActorId, handler: ClickHandler) {
        self.clicks.register(actor, handler);
    }

    pub fn deregister_click_handler(&mut self, actor: ActorId) -> bool {
        self.clicks.deregister(actor)
    }

    /// Deliver a click on `actor` to its subscriber
    pub fn click(&mut self, actor: ActorId) {
        if let Some(command) = self.clicks.dispatch(actor) {
            self.apply_command(command);
        }
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::SelectTarget { attacker, target } => {
                let valid = match (self.combatants.get(&attacker), self.combatants.get(&target)) {
                    (Some(a), Some(t)) => a.side.opposes(t.side),
                    _ => false,
                };
                if !valid {
                    log::warn!("ignoring target {} for actor {}", target.0, attacker.0);
                    return;
                }
                if let Some(c) = self.combatants.get_mut(&attacker) {
                    c.focus = Some(target);
                    self.events
                        .push(BattleEvent::TargetSelected { attacker, target });
                }
            }
            Command::ClearTarget { attacker } => {
                if let Some(c) = self.combatants.get_mut(&attacker) {
                    if c.focus.take().is_some() {
                        self.events.push(BattleEvent::TargetCleared { attacker });
                    }
                }
            }
        }
    }

    /// Who `id` should be fighting: its focus if still around, else the nearest foe
    pub fn opponent_for(&self, id: ActorId) -> Option<Target> {
        let me = self.combatants.get(&id)?;
        if let Some(focus) = me.focus.and_then(|f| self.combatants.get(&f)) {
            return Some(focus.actor.as_target());
        }

        let center = me.actor.center();
        self.combatants
            .values()
            .filter(|c| c.side.opposes(me.side))
            .min_by(|a, b| {
                distance_between(center, a.actor.center())
                    .partial_cmp(&distance_between(center, b.actor.center()))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|c| c.actor.as_target())
    }

    /// Put an attack in flight
    pub(crate) fn launch(&mut self, attack: AttackEvent) {
        let id = ProjectileId(self.next_entity_id());
        self.projectiles.push(Projectile {
            id,
            attacker: attack.attacker,
            target: attack.target,
            from: attack.from,
            to: attack.to,
            elapsed_ticks: 0,
            flight_ticks: self.tuning.projectile_flight_ticks,
        });
        self.events.push(BattleEvent::AttackLaunched {
            projectile: id,
            attack,
        });
    }

    /// Advance spears one tick and resolve those that arrive
    pub(crate) fn advance_projectiles(&mut self) {
        let mut arrived = Vec::new();
        self.projectiles.retain_mut(|p| {
            p.elapsed_ticks += 1;
            if p.elapsed_ticks >= p.flight_ticks {
                arrived.push(*p);
                false
            } else {
                true
            }
        });

        for p in arrived {
            self.land(p);
        }
    }

    pub(crate) fn push_event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Events raised since the last call
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    fn land(&mut self, p: Projectile) {
        let damage = self.tuning.attack_damage;
        let Some(target) = self.combatants.get_mut(&p.target) else {
            self.events.push(BattleEvent::ProjectileFizzled {
                projectile: p.id,
                attacker: p.attacker,
                target: p.target,
            });
            return;
        };

        target.hp = target.hp.saturating_sub(damage);
        let remaining_hp = target.hp;
        self.events.push(BattleEvent::ProjectileLanded {
            projectile: p.id,
            attacker: p.attacker,
            target: p.target,
            remaining_hp,
        });
        log::debug!(
            "spear {} hit actor {} ({} hp left)",
            p.id.0,
            p.target.0,
            remaining_hp
        );

        if remaining_hp == 0 {
            self.events.push(BattleEvent::ActorDefeated {
                actor: p.target,
                by: p.attacker,
            });
            log::info!("actor {} defeated by {}", p.target.0, p.attacker.0);
            self.remove(p.target);
        }
    }

    fn nearest_within<F>(&self, point: Vec2, anchor: F) -> Option<ActorId>
    where
        F: Fn(&Combatant) -> Option<Vec2>,
    {
        let radius = self.tuning.hit_radius;
        self.combatants
            .iter()
            .filter_map(|(id, c)| anchor(c).map(|a| (*id, distance_between(a, point))))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
