/*
 * UI Module
 *
 * This module contains the control panel built with nannou_egui and the
 * on-screen debug overlay. Parameter change detection is handled by
 * FieldParams; the panel only reports whether a respawn was requested.
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ConnectionStrategy, FieldParams, ParamChanges};

// What the panel asked the app to do this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub respawn: bool,
    pub changes: ParamChanges,
}

// Update the control panel and report what changed
pub fn update_ui(egui: &mut Egui, params: &mut FieldParams, debug_info: &DebugInfo) -> UiActions {
    let mut respawn = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Field Controls")
        .default_pos([10.0, 10.0])
        .default_open(false)
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.particle_count, FieldParams::get_particle_count_range())
                        .text("Particle Count"),
                );
                if ui.button("Respawn").clicked() {
                    respawn = true;
                }
                ui.add(egui::Slider::new(&mut params.damping, FieldParams::get_damping_range()).text("Damping"));
                ui.add(
                    egui::Slider::new(&mut params.hue_step, FieldParams::get_hue_step_range())
                        .step_by(0.001)
                        .text("Hue Step"),
                );
            });

            ui.collapsing("Pointer", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.attraction_radius, FieldParams::get_attraction_radius_range())
                        .text("Attraction Radius"),
                );
                ui.add(
                    egui::Slider::new(&mut params.attraction_strength, FieldParams::get_attraction_strength_range())
                        .text("Attraction Strength"),
                );
            });

            ui.collapsing("Connections", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.connection_radius, FieldParams::get_connection_radius_range())
                        .text("Connection Radius"),
                );
                egui::ComboBox::from_label("Strategy")
                    .selected_text(strategy_label(params.connection_strategy))
                    .show_ui(ui, |ui| {
                        for strategy in [
                            ConnectionStrategy::Auto,
                            ConnectionStrategy::BruteForce,
                            ConnectionStrategy::Grid,
                        ] {
                            ui.selectable_value(&mut params.connection_strategy, strategy, strategy_label(strategy));
                        }
                    });

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!(
                    "Frames: {} ({} skipped)",
                    debug_info.frames_run, debug_info.skipped_frames
                ));
                ui.label(format!("Pair checks: {}", debug_info.last_frame.pair_checks));
                ui.label(format!("Connections: {}", debug_info.last_frame.connections_drawn));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.paused, "Pause");
        });

    UiActions {
        respawn,
        changes: params.detect_changes(),
    }
}

fn strategy_label(strategy: ConnectionStrategy) -> &'static str {
    match strategy {
        ConnectionStrategy::Auto => "Auto",
        ConnectionStrategy::BruteForce => "Brute force",
        ConnectionStrategy::Grid => "Grid",
    }
}

// Draw debug information in the top-left corner of the window
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, window_rect: Rect, particle_count: usize, hue: f32) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.overlay_lines(particle_count, hue);

    let panel_width = 200.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // nannou centers text on its position, so shift right by half the box
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .w(160.0)
            .left_justify()
            .color(WHITE)
            .font_size(14);
    }
}

// Centered title and subtitle drawn over the field
pub fn draw_labels(draw: &Draw, window_rect: Rect, title: &str, subtitle: &str, time: f32) {
    // Slow pulse on the title
    let pulse = 0.75 + 0.15 * (time * 2.0).sin();

    draw.text(title)
        .x_y(window_rect.x(), window_rect.y() + 20.0)
        .w(window_rect.w())
        .color(rgba(1.0, 1.0, 1.0, pulse))
        .font_size(64);

    draw.text(subtitle)
        .x_y(window_rect.x(), window_rect.y() - 40.0)
        .w(window_rect.w())
        .color(rgba(1.0, 1.0, 1.0, 0.6))
        .font_size(14);
}
