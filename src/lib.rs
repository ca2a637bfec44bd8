/*
 * Particle Field - Module Definitions
 *
 * This file defines the module structure for the particle field.
 * The host-independent core (particle, field, connections, frame_loop, ...)
 * can be driven by any Surface; app, input, renderer, trail_canvas and ui
 * host it in a nannou window.
 */

// Re-export key components for easier access
pub use app::Model;
pub use color::{Hsla, Rgba};
pub use error::{FieldError, FieldResult};
pub use field::{FieldEvent, FrameOutcome, FrameStats, ListenerKind, ParticleField, TouchPoint};
pub use frame_loop::{CancelToken, FrameRequest, FrameScheduler};
pub use params::{ConnectionStrategy, FieldParams};
pub use particle::Particle;
pub use surface::{DrawCommand, DrawList, Surface};

// Define modules
pub mod app;
pub mod color;
pub mod connections;
pub mod debug;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod hue;
pub mod input;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod spatial_grid;
pub mod surface;
pub mod trail_canvas;
pub mod ui;
pub mod viewport;
