/*
 * Input Module
 *
 * This module handles window events for the particle field.
 * Every position is converted from window space to viewport space before it
 * reaches the field.
 *
 * Features:
 * - Mouse movement drives the attractor
 * - Touches are tracked in arrival order; the earliest active one drives the attractor
 * - Resizes are forwarded to the field and trigger a one-off clear
 * - Raw events are passed to egui
 */

use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::TouchPhase;

use crate::app::Model;
use crate::field::{FieldEvent, TouchPoint};
use crate::viewport::window_to_viewport;

// Active touches, earliest first
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    active: Vec<TouchPoint>,
}

impl TouchTracker {
    // Apply one touch event. Returns true if an active touch moved.
    pub fn apply(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> bool {
        match phase {
            TouchPhase::Started => {
                self.upsert(id, position);
                false
            }
            TouchPhase::Moved => {
                self.upsert(id, position);
                true
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active.retain(|touch| touch.id != id);
                false
            }
        }
    }

    pub fn active(&self) -> &[TouchPoint] {
        &self.active
    }

    fn upsert(&mut self, id: u64, position: Vec2) {
        match self.active.iter_mut().find(|touch| touch.id == id) {
            Some(touch) => touch.position = position,
            None => self.active.push(TouchPoint { id, position }),
        }
    }
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let position = window_to_viewport(pos, app.window_rect());
    model.field.handle_event(FieldEvent::PointerMove(position));
}

// Touch event handler
pub fn touch(app: &App, model: &mut Model, event: TouchEvent) {
    let position = window_to_viewport(event.position, app.window_rect());
    if model.touches.apply(event.id, event.phase, position) {
        model.field.handle_event(FieldEvent::TouchMove(model.touches.active()));
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if model.field.handle_event(FieldEvent::Resize {
        width: size.x,
        height: size.y,
    }) {
        // Resizing a canvas wipes it; mirror that before the trails resume
        model.clear_next_frame = true;
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
