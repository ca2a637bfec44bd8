/*
 * Surface Module
 *
 * The 2D immediate-mode drawing contract the particle field renders into, plus
 * DrawList, a surface that simply records what it was asked to draw.
 *
 * All coordinates are viewport coordinates: origin at the top-left corner,
 * x growing right and y growing down.
 */

use nannou::prelude::{vec2, Vec2};

use crate::color::{Hsla, Rgba};

pub trait Surface {
    // Fill an axis-aligned rectangle given its top-left corner and size
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Hsla },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: Hsla },
}

// Records draw calls so they can be replayed later or inspected
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // Cover the whole viewport with a color
    pub fn fill_viewport(&mut self, size: Vec2, color: Rgba) {
        self.fill_rect(vec2(0.0, 0.0), size, color);
    }

    // Issue every recorded command, in order, against another surface
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            match *command {
                DrawCommand::FillRect { origin, size, color } => target.fill_rect(origin, size, color),
                DrawCommand::FillCircle { center, radius, color } => {
                    target.fill_circle(center, radius, color)
                }
                DrawCommand::StrokeLine { from, to, width, color } => {
                    target.stroke_line(from, to, width, color)
                }
            }
        }
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }
}
