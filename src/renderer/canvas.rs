//! Canvas 2D painter for the display list
//!
//! Sprites are drawn as simple shapes keyed by texture name. Art faces up
//! (negative y) in local space, which matches the rotation offset applied
//! by `BattleView`.

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{DisplayList, Primitive};

const BACKGROUND: &str = "#1b2233";
/// Unscaled dragon half-length in pixels
const DRAGON_SIZE: f64 = 100.0;
const MARKER_SIZE: f64 = 16.0;
const SPEAR_LENGTH: f64 = 40.0;

fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Clear the canvas and paint every primitive in handle order
    pub fn paint(&self, list: &DisplayList) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for (_, primitive) in list.iter() {
            match primitive {
                Primitive::Sprite {
                    texture,
                    position,
                    rotation,
                    scale,
                    alpha,
                } => self.sprite(texture, *position, *rotation, *scale, *alpha)?,
                Primitive::Line {
                    from,
                    to,
                    color,
                    alpha,
                } => self.polyline(&[*from, *to], *color, *alpha),
                Primitive::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    color,
                    alpha,
                } => {
                    if *alpha <= 0.0 {
                        continue;
                    }
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.begin_path();
                    ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        *start_angle as f64,
                        *end_angle as f64,
                    )?;
                    ctx.stroke();
                }
                Primitive::Polyline {
                    points,
                    color,
                    alpha,
                } => self.polyline(points, *color, *alpha),
            }
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn polyline(&self, points: &[Vec2], color: u32, alpha: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if alpha <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_global_alpha(alpha as f64);
        ctx.set_stroke_style_str(&css_color(color));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.stroke();
    }

    fn sprite(
        &self,
        texture: &str,
        position: Vec2,
        rotation: f32,
        scale: f32,
        alpha: f32,
    ) -> Result<(), JsValue> {
        if alpha <= 0.0 {
            return Ok(());
        }
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        ctx.translate(position.x as f64, position.y as f64)?;
        ctx.rotate(rotation as f64)?;

        match texture {
            "dragon" | "dragon_enemy" => {
                let s = DRAGON_SIZE * scale as f64;
                ctx.set_fill_style_str(if texture == "dragon" { "#3fa34d" } else { "#c0392b" });
                ctx.begin_path();
                ctx.move_to(0.0, -s);
                ctx.line_to(s * 0.8, s * 0.6);
                ctx.line_to(0.0, s * 0.25);
                ctx.line_to(-s * 0.8, s * 0.6);
                ctx.close_path();
                ctx.fill();
            }
            "square" => {
                let s = MARKER_SIZE * scale as f64;
                ctx.set_fill_style_str("#ffffff");
                ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
            }
            "spear" => {
                // Spears are already aligned with their flight direction
                let half = SPEAR_LENGTH * scale as f64 / 2.0;
                ctx.set_stroke_style_str("#d9c27a");
                ctx.set_line_width(3.0);
                ctx.begin_path();
                ctx.move_to(-half, 0.0);
                ctx.line_to(half, 0.0);
                ctx.stroke();
            }
            other => log::warn!("no shape for texture {}", other),
        }

        ctx.restore();
        Ok(())
    }
}
