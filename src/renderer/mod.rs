//! Render adapter
//!
//! The simulation only produces plain state (positions, rotations, wedges,
//! curves). `BattleView` maps that state onto retained primitives through the
//! `RenderSink` trait, so the core never touches a drawing API. `DisplayList`
//! is the in-memory sink; on the web `canvas` paints it each frame.

pub mod display_list;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use display_list::{DisplayList, Primitive};
pub use view::BattleView;

use glam::Vec2;

/// Identifies one retained primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(pub u32);

/// Retained-mode drawing surface
///
/// Primitives are created once, then mutated per tick until removed.
/// Colors are 0xRRGGBB; alphas are 0.0 - 1.0.
pub trait RenderSink {
    fn add_sprite(
        &mut self,
        texture: &'static str,
        position: Vec2,
        rotation: f32,
        scale: f32,
    ) -> Handle;
    fn add_line(&mut self, from: Vec2, to: Vec2, color: u32, alpha: f32) -> Handle;
    fn add_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: u32,
        alpha: f32,
    ) -> Handle;
    fn add_polyline(&mut self, points: Vec<Vec2>, color: u32, alpha: f32) -> Handle;

    fn set_position(&mut self, handle: Handle, position: Vec2);
    fn set_rotation(&mut self, handle: Handle, rotation: f32);
    fn set_alpha(&mut self, handle: Handle, alpha: f32);
    fn set_line(&mut self, handle: Handle, from: Vec2, to: Vec2);
    fn set_arc(
        &mut self,
        handle: Handle,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    );
    fn set_points(&mut self, handle: Handle, points: Vec<Vec2>);

    fn remove(&mut self, handle: Handle);
}
