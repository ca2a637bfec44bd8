/*
 * Viewport Module
 *
 * Coordinate transformations between nannou window space (origin at the
 * window center, y up) and viewport space (origin at the top-left corner,
 * y down), which is what the particle field works in.
 */

use nannou::prelude::{vec2, Rect, Vec2};

// Convert a point from window space to viewport space
pub fn window_to_viewport(point: Vec2, window_rect: Rect) -> Vec2 {
    vec2(point.x - window_rect.left(), window_rect.top() - point.y)
}

// Convert a point from viewport space to window space
pub fn viewport_to_window(point: Vec2, window_rect: Rect) -> Vec2 {
    vec2(window_rect.left() + point.x, window_rect.top() - point.y)
}
