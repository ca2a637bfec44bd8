/*
 * Particle Field Benchmark
 *
 * Measures the cost of one full frame and of the connection pass on its own,
 * comparing the brute force pass against the spatial grid as the particle
 * count grows.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use particle_field::connections::ConnectionPass;
use particle_field::{ConnectionStrategy, DrawList, FieldParams, Particle, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;

fn spawn_particles(n: usize) -> Vec<Particle> {
    let params = FieldParams::default();
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|_| Particle::spawn(&mut rng, WIDTH, HEIGHT, &params))
        .collect()
}

// Benchmark the connection pass with both strategies
fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("connections");

    for num_particles in [80, 500, 1000, 2000].iter() {
        let particles = spawn_particles(*num_particles);

        group.bench_with_input(BenchmarkId::new("brute_force", num_particles), &particles, |b, particles| {
            let mut pass = ConnectionPass::new();
            b.iter(|| black_box(pass.brute_force(particles, 120.0).len()));
        });

        group.bench_with_input(BenchmarkId::new("grid", num_particles), &particles, |b, particles| {
            let mut pass = ConnectionPass::new();
            b.iter(|| black_box(pass.grid(particles, 120.0, WIDTH, HEIGHT).len()));
        });
    }

    group.finish();
}

// Benchmark a complete frame: overlay, physics, particles and lines
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for num_particles in [80, 500, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let params = FieldParams {
                particle_count: n,
                connection_strategy: ConnectionStrategy::Auto,
                ..FieldParams::default()
            };
            let mut rng = StdRng::seed_from_u64(3);
            let (mut field, first) = ParticleField::mount(params, WIDTH, HEIGHT, &mut rng)
                .expect("benchmark field mounts");
            let mut request = Some(first);
            let mut list = DrawList::new();

            b.iter(|| {
                list.clear();
                if let Some(current) = request.take() {
                    request = field.run_frame(current, &mut list).into_next();
                }
                black_box(list.len());
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_connections, bench_frame
}

criterion_main!(benches);
