/*
 * Connections Module
 *
 * Finds every unordered pair of particles closer than the connection radius.
 * Two passes produce the same pairs in the same (i, j) order:
 * - brute force checks all n(n-1)/2 pairs
 * - grid only checks pairs that share a 3x3 block of grid cells
 */

use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub distance: f32,
}

// Line opacity for two particles `distance` apart: `max_alpha` when they touch,
// fading linearly to 0 at `radius`. `None` means no line is drawn.
pub fn connection_alpha(distance: f32, radius: f32, max_alpha: f32) -> Option<f32> {
    if distance < radius {
        Some((1.0 - distance / radius) * max_alpha)
    } else {
        None
    }
}

// Reusable buffers for the per-frame connection search
#[derive(Default)]
pub struct ConnectionPass {
    grid: Option<SpatialGrid>,
    connections: Vec<Connection>,
    nearby: Vec<usize>,
    pair_checks: usize,
}

impl ConnectionPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    // Distance tests performed by the last pass
    pub fn pair_checks(&self) -> usize {
        self.pair_checks
    }

    pub fn brute_force(&mut self, particles: &[Particle], radius: f32) -> &[Connection] {
        self.connections.clear();
        self.pair_checks = 0;

        for (i, p1) in particles.iter().enumerate() {
            for (offset, p2) in particles[i + 1..].iter().enumerate() {
                self.pair_checks += 1;
                let distance = p1.position.distance(p2.position);
                if distance < radius {
                    self.connections.push(Connection {
                        from: i,
                        to: i + 1 + offset,
                        distance,
                    });
                }
            }
        }

        &self.connections
    }

    pub fn grid(&mut self, particles: &[Particle], radius: f32, width: f32, height: f32) -> &[Connection] {
        self.connections.clear();
        self.pair_checks = 0;

        // Recreate the grid only when the radius or viewport changed
        let mut grid = match self.grid.take() {
            Some(grid) if grid.fits(radius, width, height) => grid,
            _ => SpatialGrid::new(radius, width, height),
        };

        grid.clear();
        for (i, particle) in particles.iter().enumerate() {
            grid.insert(i, particle.position);
        }

        for (i, p1) in particles.iter().enumerate() {
            self.nearby.clear();
            grid.collect_nearby(p1.position, &mut self.nearby);
            // Keep each pair once and in the same order as the brute force pass
            self.nearby.retain(|&j| j > i);
            self.nearby.sort_unstable();

            for &j in &self.nearby {
                self.pair_checks += 1;
                let distance = p1.position.distance(particles[j].position);
                if distance < radius {
                    self.connections.push(Connection { from: i, to: j, distance });
                }
            }
        }

        self.grid = Some(grid);
        &self.connections
    }
}
