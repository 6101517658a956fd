//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by actor ID)
//! - No rendering or platform dependencies

pub mod actor;
pub mod clicks;
pub mod cooldown;
pub mod curve;
pub mod geometry;
pub mod path;
pub mod state;
pub mod targeting;
pub mod tick;
pub mod wedge;

pub use actor::{Actor, ActorId, ActorMode, ActorSnapshot, ActorUpdate, Movement};
pub use clicks::{ClickHandler, ClickRegistry, Command};
pub use cooldown::CombatTimer;
pub use curve::ControlCurve;
pub use geometry::{
    angle_between, angle_within, distance_between, find_point_at_distance, point_is_within_angle,
};
pub use path::{PathError, PathFollower};
pub use state::{
    BattleEvent, BattlePhase, BattleState, Combatant, Projectile, ProjectileId, Side,
};
pub use targeting::{AttackEvent, Target, compute_wedge, evaluate_attack, is_in_range};
pub use tick::{InputEvent, TickInput, tick};
pub use wedge::Wedge;
