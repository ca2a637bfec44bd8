/*
 * Particle Field
 *
 * A constellation of drifting particles that bounce off the window edges,
 * gather around the pointer and link up with fading lines when close.
 * A hue that cycles every frame colors the whole field.
 *
 * Logging honours RUST_LOG; the default is info with debug for this crate.
 */

use particle_field::app;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,particle_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    nannou::app(app::model)
        .update(app::update)
        .exit(app::exit)
        .run();
}
