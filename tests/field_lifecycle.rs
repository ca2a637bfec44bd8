// End-to-end behaviour of a mounted field driven the way a host drives it:
// events in, frame requests chained, draw calls recorded.

use particle_field::connections::connection_alpha;
use particle_field::{
    DrawCommand, DrawList, FieldEvent, FieldParams, FrameOutcome, FrameRequest, ListenerKind, ParticleField,
    TouchPoint,
};
use nannou::prelude::vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mount(width: f32, height: f32) -> (ParticleField, FrameRequest) {
    let mut rng = StdRng::seed_from_u64(2024);
    ParticleField::mount(FieldParams::default(), width, height, &mut rng).expect("field mounts")
}

// Run `frames` frames, returning the request for the one after
fn run_frames(field: &mut ParticleField, mut request: FrameRequest, frames: usize) -> FrameRequest {
    let mut list = DrawList::new();
    for _ in 0..frames {
        list.clear();
        request = field
            .run_frame(request, &mut list)
            .into_next()
            .expect("loop keeps running while mounted");
    }
    request
}

#[test]
fn hue_returns_to_zero_after_twelve_hundred_frames() {
    let (mut field, request) = mount(800.0, 600.0);

    let request = run_frames(&mut field, request, 600);
    assert!((field.hue() - 180.0).abs() < 1e-3);

    run_frames(&mut field, request, 600);
    assert_eq!(field.hue(), 0.0);
    assert_eq!(field.frames_run(), 1200);
    assert_eq!(field.particles().len(), 80);
}

#[test]
fn every_drawn_line_respects_the_connection_radius() {
    let (mut field, request) = mount(600.0, 400.0);
    let request = run_frames(&mut field, request, 30);

    let mut list = DrawList::new();
    field.run_frame(request, &mut list);

    let positions: Vec<_> = field.particles().iter().map(|p| p.position).collect();
    let mut expected = 0;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if a.distance(*b) < 120.0 {
                expected += 1;
            }
        }
    }

    assert_eq!(list.lines().count(), expected);
    for line in list.lines() {
        if let DrawCommand::StrokeLine { from, to, width, color } = line {
            let distance = from.distance(*to);
            assert!(distance < 120.0);
            assert_eq!(*width, 0.5);
            let alpha = connection_alpha(distance, 120.0, 0.3).unwrap();
            assert!((color.alpha - alpha).abs() < 1e-5);
            assert!(color.alpha <= 0.3);
        }
    }
}

#[test]
fn pointer_gathers_nearby_particles() {
    let (mut field, request) = mount(800.0, 600.0);
    let pointer = vec2(400.0, 300.0);
    field.handle_event(FieldEvent::PointerMove(pointer));

    let nearby: Vec<usize> = field
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.position.distance(pointer) < 150.0)
        .map(|(i, _)| i)
        .collect();
    assert!(!nearby.is_empty(), "seeded layout puts particles near the center");

    let mean_distance = |field: &ParticleField| {
        nearby
            .iter()
            .map(|&i| field.particles()[i].position.distance(pointer))
            .sum::<f32>()
            / nearby.len() as f32
    };

    let before = mean_distance(&field);
    run_frames(&mut field, request, 60);
    let after = mean_distance(&field);

    assert!(after < before, "mean distance went from {before} to {after}");
}

#[test]
fn touch_without_points_keeps_the_last_pointer() {
    let (mut field, _request) = mount(800.0, 600.0);

    field.handle_event(FieldEvent::TouchMove(&[TouchPoint {
        id: 1,
        position: vec2(50.0, 60.0),
    }]));
    field.handle_event(FieldEvent::TouchMove(&[]));

    assert_eq!(field.pointer(), vec2(50.0, 60.0));
}

#[test]
fn residual_request_after_teardown_is_a_no_op() {
    let (mut field, request) = mount(800.0, 600.0);
    let pending = run_frames(&mut field, request, 3);

    field.teardown();
    field.teardown();

    for kind in [ListenerKind::Resize, ListenerKind::PointerMove, ListenerKind::TouchMove] {
        assert!(!field.listeners().is_registered(kind));
    }

    let mut list = DrawList::new();
    let outcome = field.run_frame(pending, &mut list);
    assert!(matches!(outcome, FrameOutcome::Cancelled));
    assert!(outcome.into_next().is_none());
    assert!(list.is_empty());
    assert_eq!(field.frames_run(), 3);
}

#[test]
fn shrinking_the_viewport_turns_particles_around_next_frame() {
    let (mut field, request) = mount(1000.0, 1000.0);
    let before = field.particles().to_vec();

    field.handle_event(FieldEvent::Resize {
        width: 10.0,
        height: 10.0,
    });
    run_frames(&mut field, request, 1);

    let mut reflected = 0;
    for (old, new) in before.iter().zip(field.particles()) {
        if new.position.x > 10.0 && old.velocity.x > 0.0 {
            assert!(new.velocity.x < 0.0);
            reflected += 1;
        }
        if new.position.y > 10.0 && old.velocity.y > 0.0 {
            assert!(new.velocity.y < 0.0);
            reflected += 1;
        }
    }
    assert!(reflected > 0);
}
