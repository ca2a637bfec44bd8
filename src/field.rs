/*
 * Particle Field Module
 *
 * ParticleField owns everything the effect mutates: the particles, the last
 * pointer position, the hue and the viewport size. The host feeds it events
 * and runs the frames it schedules; the field never reaches out to the host.
 *
 * Lifecycle:
 * - mount: validate, register listeners, spawn particles, request frame one
 * - run_frame: overlay, update + draw particles, draw connections, advance hue,
 *   request the next frame
 * - teardown: remove listeners, cancel the frame loop
 */

use nannou::prelude::{vec2, Vec2};
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::color::Hsla;
use crate::connections::{connection_alpha, ConnectionPass};
use crate::error::{FieldError, FieldResult};
use crate::frame_loop::{FrameRequest, FrameScheduler};
use crate::hue::HueCycle;
use crate::params::FieldParams;
use crate::particle::{draw_particle, update_particle, Particle, StepContext};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    Resize,
    PointerMove,
    TouchMove,
}

// Which host events the field is currently subscribed to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Listeners {
    resize: bool,
    pointer_move: bool,
    touch_move: bool,
}

impl Listeners {
    pub fn register(&mut self, kind: ListenerKind) {
        *self.slot(kind) = true;
    }

    pub fn remove_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_registered(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::Resize => self.resize,
            ListenerKind::PointerMove => self.pointer_move,
            ListenerKind::TouchMove => self.touch_move,
        }
    }

    pub fn count(&self) -> usize {
        [self.resize, self.pointer_move, self.touch_move]
            .iter()
            .filter(|&&registered| registered)
            .count()
    }

    fn slot(&mut self, kind: ListenerKind) -> &mut bool {
        match kind {
            ListenerKind::Resize => &mut self.resize,
            ListenerKind::PointerMove => &mut self.pointer_move,
            ListenerKind::TouchMove => &mut self.touch_move,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Vec2,
}

// Host input, already converted to viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldEvent<'a> {
    Resize { width: f32, height: f32 },
    PointerMove(Vec2),
    // Active touches, earliest first
    TouchMove(&'a [TouchPoint]),
}

impl FieldEvent<'_> {
    pub fn listener(&self) -> ListenerKind {
        match self {
            FieldEvent::Resize { .. } => ListenerKind::Resize,
            FieldEvent::PointerMove(_) => ListenerKind::PointerMove,
            FieldEvent::TouchMove(_) => ListenerKind::TouchMove,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles_updated: usize,
    pub pair_checks: usize,
    pub connections_drawn: usize,
    // Zero-area viewport: nothing was updated or drawn
    pub skipped: bool,
}

impl FrameStats {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum FrameOutcome {
    // The frame ran; `next` must be run to keep the loop going
    Drawn { stats: FrameStats, next: FrameRequest },
    // Zero-area viewport: nothing moved or drew, the loop keeps going
    Skipped { stats: FrameStats, next: FrameRequest },
    // The request was stale or the loop was torn down; nothing happened
    Cancelled,
}

impl FrameOutcome {
    pub fn stats(&self) -> Option<FrameStats> {
        match self {
            FrameOutcome::Drawn { stats, .. } | FrameOutcome::Skipped { stats, .. } => Some(*stats),
            FrameOutcome::Cancelled => None,
        }
    }

    pub fn into_next(self) -> Option<FrameRequest> {
        match self {
            FrameOutcome::Drawn { next, .. } | FrameOutcome::Skipped { next, .. } => Some(next),
            FrameOutcome::Cancelled => None,
        }
    }
}

pub struct ParticleField {
    params: FieldParams,
    particles: Vec<Particle>,
    pointer: Vec2,
    hue: HueCycle,
    size: Vec2,
    listeners: Listeners,
    scheduler: FrameScheduler,
    connections: ConnectionPass,
}

impl ParticleField {
    // Set the field up on a `width` x `height` viewport and schedule its first frame.
    //
    // Fails without scheduling anything if the viewport size is unusable or the
    // parameters do not validate.
    pub fn mount<R: Rng + ?Sized>(
        params: FieldParams,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> FieldResult<(Self, FrameRequest)> {
        if !is_usable_extent(width) || !is_usable_extent(height) {
            return Err(FieldError::SurfaceUnavailable {
                reason: format!("viewport reports {}x{}", width, height),
            });
        }
        params.validate()?;

        let mut listeners = Listeners::default();
        listeners.register(ListenerKind::Resize);
        listeners.register(ListenerKind::PointerMove);
        listeners.register(ListenerKind::TouchMove);

        let particles: Vec<Particle> = (0..params.particle_count)
            .map(|_| Particle::spawn(rng, width, height, &params))
            .collect();

        let mut scheduler = FrameScheduler::new();
        let first = scheduler
            .request()
            .ok_or_else(|| FieldError::SurfaceUnavailable {
                reason: "frame loop was cancelled before it started".to_string(),
            })?;

        info!(
            particles = particles.len(),
            width,
            height,
            grid = params.uses_grid(),
            "particle field mounted"
        );

        let field = Self {
            hue: HueCycle::new(params.hue_step),
            params,
            particles,
            pointer: Vec2::ZERO,
            size: vec2(width, height),
            listeners,
            scheduler,
            connections: ConnectionPass::new(),
        };

        Ok((field, first))
    }

    // Route a host event to its handler. Returns false if nobody is listening.
    pub fn handle_event(&mut self, event: FieldEvent<'_>) -> bool {
        if !self.listeners.is_registered(event.listener()) {
            trace!(?event, "event ignored, listener not registered");
            return false;
        }

        match event {
            FieldEvent::Resize { width, height } => self.resize(width, height),
            FieldEvent::PointerMove(position) => {
                self.pointer = position;
                true
            }
            FieldEvent::TouchMove(touches) => match touches.first() {
                Some(touch) => {
                    self.pointer = touch.position;
                    true
                }
                None => false,
            },
        }
    }

    fn resize(&mut self, width: f32, height: f32) -> bool {
        if !is_usable_extent(width) || !is_usable_extent(height) {
            warn!(width, height, "ignoring resize to unusable dimensions");
            return false;
        }
        debug!(width, height, "particle field resized");
        self.size = vec2(width, height);
        true
    }

    // Run one scheduled frame against `surface`.
    pub fn run_frame<S: Surface + ?Sized>(&mut self, request: FrameRequest, surface: &mut S) -> FrameOutcome {
        if !self.scheduler.begin(&request) {
            trace!(request = request.id(), "frame request is no longer current");
            return FrameOutcome::Cancelled;
        }

        let stats = if self.has_area() {
            self.draw_frame(surface)
        } else {
            FrameStats::skipped()
        };

        match self.scheduler.request() {
            Some(next) if stats.skipped => FrameOutcome::Skipped { stats, next },
            Some(next) => FrameOutcome::Drawn { stats, next },
            None => FrameOutcome::Cancelled,
        }
    }

    fn draw_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let (width, height) = (self.size.x, self.size.y);

        // Translucent overlay instead of a clear, leaving fading trails
        surface.fill_rect(Vec2::ZERO, self.size, self.params.trail_color);

        let ctx = StepContext::new(&self.params, width, height, self.pointer);
        let particle_color = self.color(self.params.particle_alpha);
        for particle in &mut self.particles {
            update_particle(particle, &ctx);
            draw_particle(surface, particle, particle_color);
        }

        let radius = self.params.connection_radius;
        let connections = if self.params.uses_grid() {
            self.connections.grid(&self.particles, radius, width, height)
        } else {
            self.connections.brute_force(&self.particles, radius)
        };

        let line_color = Hsla::new(
            self.hue.degrees(),
            self.params.saturation,
            self.params.lightness,
            0.0,
        );
        let mut connections_drawn = 0;
        for connection in connections {
            if let Some(alpha) = connection_alpha(connection.distance, radius, self.params.connection_max_alpha) {
                surface.stroke_line(
                    self.particles[connection.from].position,
                    self.particles[connection.to].position,
                    self.params.connection_width,
                    line_color.with_alpha(alpha),
                );
                connections_drawn += 1;
            }
        }

        self.hue.advance();

        let stats = FrameStats {
            particles_updated: self.particles.len(),
            pair_checks: self.connections.pair_checks(),
            connections_drawn,
            skipped: false,
        };
        trace!(?stats, hue = self.hue.degrees(), "frame drawn");
        stats
    }

    // Apply new tunables. The particle count of a mounted field never changes.
    pub fn set_params(&mut self, mut params: FieldParams) -> FieldResult<()> {
        params.validate()?;
        if params.particle_count != self.particles.len() {
            debug!(
                requested = params.particle_count,
                current = self.particles.len(),
                "particle count is fixed for a mounted field; remount to change it"
            );
            params.particle_count = self.particles.len();
        }
        self.hue.set_step(params.hue_step);
        self.params = params;
        Ok(())
    }

    // Stop the frame loop and drop every listener. Calling it again is harmless.
    pub fn teardown(&mut self) {
        if self.scheduler.is_cancelled() {
            debug!("particle field already torn down");
            return;
        }
        self.listeners.remove_all();
        self.scheduler.cancel();
        info!(frames = self.scheduler.frames_run(), "particle field torn down");
    }

    pub fn is_mounted(&self) -> bool {
        !self.scheduler.is_cancelled()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn hue(&self) -> f32 {
        self.hue.degrees()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn frames_run(&self) -> u64 {
        self.scheduler.frames_run()
    }

    fn has_area(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    fn color(&self, alpha: f32) -> Hsla {
        Hsla::new(
            self.hue.degrees(),
            self.params.saturation,
            self.params.lightness,
            alpha,
        )
    }
}

fn is_usable_extent(extent: f32) -> bool {
    extent.is_finite() && extent >= 0.0
}
