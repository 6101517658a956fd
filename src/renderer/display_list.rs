//! Retained display list

use std::collections::BTreeMap;

use glam::Vec2;

use super::{Handle, RenderSink};

/// One retained primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sprite {
        texture: &'static str,
        position: Vec2,
        rotation: f32,
        scale: f32,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: u32,
        alpha: f32,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: u32,
        alpha: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: u32,
        alpha: f32,
    },
}

/// In-memory sink; iteration order is creation order
#[derive(Debug, Default)]
pub struct DisplayList {
    primitives: BTreeMap<Handle, Primitive>,
    next_handle: u32,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: Handle) -> Option<&Primitive> {
        self.primitives.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in draw order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Primitive)> {
        self.primitives.iter().map(|(h, p)| (*h, p))
    }

    fn insert(&mut self, primitive: Primitive) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.primitives.insert(handle, primitive);
        handle
    }

    fn with<F: FnOnce(&mut Primitive)>(&mut self, handle: Handle, f: F) {
        match self.primitives.get_mut(&handle) {
            Some(primitive) => f(primitive),
            None => log::warn!("update to missing primitive {}", handle.0),
        }
    }
}

impl RenderSink for DisplayList {
    fn add_sprite(
        &mut self,
        texture: &'static str,
        position: Vec2,
        rotation: f32,
        scale: f32,
    ) -> Handle {
        self.insert(Primitive::Sprite {
            texture,
            position,
            rotation,
            scale,
            alpha: 1.0,
        })
    }

    fn add_line(&mut self, from: Vec2, to: Vec2, color: u32, alpha: f32) -> Handle {
        self.insert(Primitive::Line {
            from,
            to,
            color,
            alpha,
        })
    }

    fn add_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: u32,
        alpha: f32,
    ) -> Handle {
        self.insert(Primitive::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color,
            alpha,
        })
    }

    fn add_polyline(&mut self, points: Vec<Vec2>, color: u32, alpha: f32) -> Handle {
        self.insert(Primitive::Polyline {
            points,
            color,
            alpha,
        })
    }

    fn set_position(&mut self, handle: Handle, new_position: Vec2) {
        self.with(handle, |p| match p {
            Primitive::Sprite { position, .. } => *position = new_position,
            Primitive::Arc { center, .. } => *center = new_position,
            _ => log::warn!("set_position on a primitive without a position"),
        });
    }

    fn set_rotation(&mut self, handle: Handle, new_rotation: f32) {
        self.with(handle, |p| match p {
            Primitive::Sprite { rotation, .. } => *rotation = new_rotation,
            _ => log::warn!("set_rotation on a primitive without a rotation"),
        });
    }

    fn set_alpha(&mut self, handle: Handle, new_alpha: f32) {
        self.with(handle, |p| match p {
            Primitive::Sprite { alpha, .. }
            | Primitive::Line { alpha, .. }
            | Primitive::Arc { alpha, .. }
            | Primitive::Polyline { alpha, .. } => *alpha = new_alpha,
        });
    }

    fn set_line(&mut self, handle: Handle, new_from: Vec2, new_to: Vec2) {
        self.with(handle, |p| match p {
            Primitive::Line { from, to, .. } => {
                *from = new_from;
                *to = new_to;
            }
            _ => log::warn!("set_line on a non-line primitive"),
        });
    }

    fn set_arc(
        &mut self,
        handle: Handle,
        new_center: Vec2,
        new_radius: f32,
        new_start: f32,
        new_end: f32,
    ) {
        self.with(handle, |p| match p {
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                *center = new_center;
                *radius = new_radius;
                *start_angle = new_start;
                *end_angle = new_end;
            }
            _ => log::warn!("set_arc on a non-arc primitive"),
        });
    }

    fn set_points(&mut self, handle: Handle, new_points: Vec<Vec2>) {
        self.with(handle, |p| match p {
            Primitive::Polyline { points, .. } => *points = new_points,
            _ => log::warn!("set_points on a non-polyline primitive"),
        });
    }

    fn remove(&mut self, handle: Handle) {
        self.primitives.remove(&handle);
    }
}
