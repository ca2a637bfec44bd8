/*
 * Particle Module
 *
 * This module defines the Particle record and the two things that happen to a
 * particle every frame:
 * 1. update_particle: integrate, bounce off the edges, get pulled toward the
 *    pointer and lose a little speed to damping
 * 2. draw_particle: paint it as a filled circle
 *
 * Particles carry no behavior of their own; everything they need from the
 * outside world arrives through StepContext.
 */

use nannou::prelude::{vec2, Vec2};
use rand::Rng;

use crate::color::Hsla;
use crate::params::FieldParams;
use crate::surface::Surface;

// Below this separation the pointer direction is undefined, so no pull is applied
pub const ATTRACTION_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    // Random particle somewhere on a width x height surface
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, params: &FieldParams) -> Self {
        // gen::<f32>() is in [0, 1), which also copes with a zero-sized surface
        let position = vec2(rng.gen::<f32>() * width, rng.gen::<f32>() * height);

        let speed = params.initial_speed;
        let velocity = vec2(
            (rng.gen::<f32>() - 0.5) * 2.0 * speed,
            (rng.gen::<f32>() - 0.5) * 2.0 * speed,
        );

        let radius = params.min_radius + rng.gen::<f32>() * (params.max_radius - params.min_radius);

        Self::new(position, velocity, radius)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

// Everything a particle update needs besides the particle itself
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
    pub width: f32,
    pub height: f32,
    pub pointer: Vec2,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub damping: f32,
}

impl StepContext {
    pub fn new(params: &FieldParams, width: f32, height: f32, pointer: Vec2) -> Self {
        Self {
            width,
            height,
            pointer,
            attraction_radius: params.attraction_radius,
            attraction_strength: params.attraction_strength,
            damping: params.damping,
        }
    }
}

// Linear falloff of the pointer pull: 1 at distance 0, 0 at `radius` and beyond.
pub fn attraction_force(distance: f32, radius: f32) -> f32 {
    if distance >= radius {
        0.0
    } else {
        (radius - distance) / radius
    }
}

// Advance a particle by one frame
pub fn update_particle(particle: &mut Particle, ctx: &StepContext) {
    particle.position += particle.velocity;

    // Reflect off the edges using the post-integration position.
    // The position is left where it is, so a particle may sit just outside for a frame.
    if particle.position.x < 0.0 || particle.position.x > ctx.width {
        particle.velocity.x = -particle.velocity.x;
    }
    if particle.position.y < 0.0 || particle.position.y > ctx.height {
        particle.velocity.y = -particle.velocity.y;
    }

    // Pull toward the pointer
    let dx = ctx.pointer.x - particle.position.x;
    let dy = ctx.pointer.y - particle.position.y;
    let dist = (dx * dx + dy * dy).sqrt();

    if dist < ctx.attraction_radius && dist > ATTRACTION_EPSILON {
        let force = attraction_force(dist, ctx.attraction_radius);
        particle.velocity.x += (dx / dist) * force * ctx.attraction_strength;
        particle.velocity.y += (dy / dist) * force * ctx.attraction_strength;
    }

    particle.velocity *= ctx.damping;
}

pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, particle: &Particle, color: Hsla) {
    surface.fill_circle(particle.position, particle.radius, color);
}
