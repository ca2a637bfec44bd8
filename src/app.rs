/*
 * Application Module
 *
 * This module defines the nannou model that hosts a ParticleField.
 * nannou plays the part of the host environment:
 * - update() runs the frame the field scheduled and paints its draw calls
 *   into the trail canvas
 * - view() shows the canvas with the labels and controls on top (see renderer.rs)
 * - window events are forwarded from input.rs
 * - exit() tears the field down
 */

use std::path::PathBuf;

use anyhow::Context;
use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::debug::DebugInfo;
use crate::error::{FieldError, FieldResult};
use crate::field::ParticleField;
use crate::frame_loop::FrameRequest;
use crate::input::{self, TouchTracker};
use crate::params::FieldParams;
use crate::renderer;
use crate::surface::DrawList;
use crate::trail_canvas::TrailCanvas;
use crate::ui;

// Config file read at startup unless PARTICLE_FIELD_CONFIG points elsewhere
pub const DEFAULT_CONFIG_PATH: &str = "assets/field.toml";
pub const CONFIG_PATH_ENV: &str = "PARTICLE_FIELD_CONFIG";

// Opaque version of the trail color, used to wipe the window
pub const BACKGROUND: crate::color::Rgba = crate::color::Rgba::new(10, 10, 20, 1.0);

const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

// Main model for the application
pub struct Model {
    pub window_id: WindowId,
    pub canvas: TrailCanvas,
    pub field: ParticleField,
    pub next_frame: Option<FrameRequest>,
    pub params: FieldParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub draw_list: DrawList,
    pub touches: TouchTracker,
    pub clear_next_frame: bool,
}

// Initialize the model. Failing to get a window is fatal.
pub fn model(app: &App) -> Model {
    match try_model(app) {
        Ok(model) => model,
        Err(err) => {
            error!(error = %err, "cannot start particle field");
            std::process::exit(1);
        }
    }
}

fn try_model(app: &App) -> FieldResult<Model> {
    let params = load_params();

    // 80% of the primary monitor if we can see one
    let (width, height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        })
        .unwrap_or(FALLBACK_WINDOW_SIZE);

    let window_id = app
        .new_window()
        .title("Particle Field")
        .size(width, height)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .touch(input::touch)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .map_err(|e| FieldError::SurfaceUnavailable {
            reason: format!("{:?}", e),
        })?;

    let window = app.window(window_id).ok_or_else(|| FieldError::SurfaceUnavailable {
        reason: "window closed during startup".to_string(),
    })?;
    let egui = Egui::from_window(&window);
    let canvas = TrailCanvas::new(&window);
    let (viewport_width, viewport_height) = window.inner_size_points();
    drop(window);

    let (field, first_frame) =
        ParticleField::mount(params.clone(), viewport_width, viewport_height, &mut rand::thread_rng())?;

    Ok(Model {
        window_id,
        canvas,
        field,
        next_frame: Some(first_frame),
        params,
        egui,
        debug_info: DebugInfo::default(),
        draw_list: DrawList::new(),
        touches: TouchTracker::default(),
        clear_next_frame: true,
    })
}

// Read the config file, falling back to defaults on any problem
fn load_params() -> FieldParams {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match read_params(&path) {
        Ok(params) => params,
        Err(err) => {
            warn!("{:#}; using defaults", err);
            FieldParams::default()
        }
    }
}

fn read_params(path: &std::path::Path) -> anyhow::Result<FieldParams> {
    FieldParams::load(path).with_context(|| format!("could not use config {}", path.display()))
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);
    let actions = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if actions.respawn || actions.changes.count_changed {
        respawn(app, model);
    } else if actions.changes.any_changed {
        if let Err(err) = model.field.set_params(model.params.clone()) {
            warn!(error = %err, "rejected parameter change");
        }
    }

    let Some(window) = app.window(model.window_id) else {
        return;
    };

    // A new size or scale factor needs a new texture, which starts out empty
    if !model.canvas.fits(&window) {
        model.canvas = TrailCanvas::new(&window);
        model.clear_next_frame = true;
    }

    let paused = model.params.paused;
    let clear = std::mem::take(&mut model.clear_next_frame);
    record_canvas(
        &mut model.field,
        &mut model.next_frame,
        &mut model.debug_info,
        &mut model.draw_list,
        clear,
        paused,
    );
    model.canvas.paint(&window, &model.draw_list);
}

// Record what goes onto the trail canvas this update: an optional wipe, then
// the frame the field scheduled. Nothing is recorded for the frame while paused.
fn record_canvas(
    field: &mut ParticleField,
    next_frame: &mut Option<FrameRequest>,
    debug_info: &mut DebugInfo,
    draw_list: &mut DrawList,
    clear: bool,
    paused: bool,
) {
    draw_list.clear();

    if clear {
        draw_list.fill_viewport(field.size(), BACKGROUND);
    }

    if paused {
        return;
    }

    let Some(request) = next_frame.take() else {
        return;
    };

    let outcome = field.run_frame(request, draw_list);
    if let Some(stats) = outcome.stats() {
        debug_info.record(stats);
    }
    *next_frame = outcome.into_next();
}

// Replace the current field with a freshly mounted one
fn respawn(app: &App, model: &mut Model) {
    let rect = app.window_rect();
    match ParticleField::mount(model.params.clone(), rect.w(), rect.h(), &mut rand::thread_rng()) {
        Ok((field, first_frame)) => {
            model.field.teardown();
            model.field = field;
            model.next_frame = Some(first_frame);
            model.clear_next_frame = true;
            info!(particles = model.params.particle_count, "respawned particle field");
        }
        Err(err) => warn!(error = %err, "respawn failed, keeping current field"),
    }
}

// Tear the field down when the app closes
pub fn exit(_app: &App, mut model: Model) {
    model.next_frame = None;
    model.field.teardown();
}
