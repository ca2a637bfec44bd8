/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects performance metrics
 * shown in the control panel and the on-screen debug overlay.
 *
 * Includes metrics for:
 * - FPS and frame time as reported by the host
 * - Frames the field ran, and frames it skipped on a zero-area viewport
 * - Pair checks and connections from the last frame
 */

use std::time::Duration;

use crate::field::FrameStats;

#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames_run: u64,
    pub skipped_frames: u64,
    pub last_frame: FrameStats,
}

impl DebugInfo {
    // Skipped frames are counted but keep the last drawn frame's numbers
    pub fn record(&mut self, stats: FrameStats) {
        if stats.skipped {
            self.skipped_frames += 1;
        } else {
            self.frames_run += 1;
            self.last_frame = stats;
        }
    }

    // Lines for the on-screen overlay
    pub fn overlay_lines(&self, particle_count: usize, hue: f32) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Frames: {} ({} skipped)", self.frames_run, self.skipped_frames),
            format!("Particles: {}", particle_count),
            format!("Pair checks: {}", self.last_frame.pair_checks),
            format!("Connections: {}", self.last_frame.connections_drawn),
            format!("Hue: {:.1}", hue),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_frames_keep_the_last_drawn_stats() {
        let mut info = DebugInfo::default();
        info.record(FrameStats {
            particles_updated: 80,
            pair_checks: 3160,
            connections_drawn: 12,
            skipped: false,
        });
        info.record(FrameStats {
            skipped: true,
            ..FrameStats::default()
        });
        info.record(FrameStats {
            skipped: true,
            ..FrameStats::default()
        });

        assert_eq!(info.frames_run, 1);
        assert_eq!(info.skipped_frames, 2);
        assert_eq!(info.last_frame.connections_drawn, 12);

        let lines = info.overlay_lines(80, 12.3);
        assert!(lines.contains(&"Frames: 1 (2 skipped)".to_string()));
        assert!(lines.contains(&"Pair checks: 3160".to_string()));
        assert!(lines.contains(&"Connections: 12".to_string()));
    }
}
