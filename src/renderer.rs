/*
 * Renderer Module
 *
 * This module puts the particle field on screen. update() paints the frame's
 * draw calls into the TrailCanvas; view() clears the window, draws the canvas
 * texture, then the overlay labels, the optional debug panel and the egui UI.
 *
 * Only the canvas keeps its contents between frames. Everything drawn on top
 * of it is redrawn from scratch every frame, so labels and panels never
 * collect in the trails, including while the field is paused.
 */

use nannou::prelude::*;

use crate::app::{Model, BACKGROUND};
use crate::color;
use crate::surface::Surface;
use crate::ui;
use crate::viewport::viewport_to_window;

// Surface backed by a nannou Draw. Viewport points are scaled onto `target`,
// which is laid out like nannou window space (origin at the center, y up).
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    target: Rect,
    scale: f32,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, target: Rect, scale: f32) -> Self {
        Self { draw, target, scale }
    }

    fn point(&self, point: Vec2) -> Vec2 {
        to_target(point, self.target, self.scale)
    }
}

impl Surface for NannouSurface<'_> {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, fill: color::Rgba) {
        self.draw
            .rect()
            .xy(self.point(origin + size * 0.5))
            .wh(size * self.scale)
            .color(to_srgba(fill));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: color::Hsla) {
        self.draw
            .ellipse()
            .xy(self.point(center))
            .radius(radius * self.scale)
            .color(to_turns(fill));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: color::Hsla) {
        self.draw
            .line()
            .start(self.point(from))
            .end(self.point(to))
            .weight(width * self.scale)
            .color(to_turns(stroke));
    }
}

// Viewport point to target space, `scale` target units per viewport point
pub fn to_target(point: Vec2, target: Rect, scale: f32) -> Vec2 {
    viewport_to_window(point * scale, target)
}

fn to_srgba(c: color::Rgba) -> Rgba {
    rgba(
        c.red as f32 / 255.0,
        c.green as f32 / 255.0,
        c.blue as f32 / 255.0,
        c.alpha,
    )
}

// nannou expects hue as a fraction of a turn
fn to_turns(c: color::Hsla) -> Hsla {
    hsla(c.hue / 360.0, c.saturation, c.lightness, c.alpha)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(to_srgba(BACKGROUND));
    draw.texture(model.canvas.texture()).wh(window_rect.wh());

    ui::draw_labels(
        &draw,
        window_rect,
        &model.params.title,
        &model.params.subtitle,
        app.time,
    );

    if model.params.show_debug {
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.field.particles().len(),
            model.field.hue(),
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::error!(error = ?err, "failed to render frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::error!(error = ?err, "failed to render controls");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_points_scale_onto_the_texture() {
        // 800x600 points on a 2x display: a 1600x1200 pixel texture
        let target = Rect::from_w_h(1600.0, 1200.0);

        assert_eq!(to_target(vec2(0.0, 0.0), target, 2.0), vec2(-800.0, 600.0));
        assert_eq!(to_target(vec2(800.0, 600.0), target, 2.0), vec2(800.0, -600.0));
        assert_eq!(to_target(vec2(400.0, 300.0), target, 2.0), vec2(0.0, 0.0));
    }

    #[test]
    fn unit_scale_matches_window_space() {
        let target = Rect::from_w_h(800.0, 600.0);
        let point = vec2(123.0, 45.0);
        assert_eq!(to_target(point, target, 1.0), viewport_to_window(point, target));
    }
}
