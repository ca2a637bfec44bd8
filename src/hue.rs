/*
 * Hue Cycle Module
 *
 * The frame-global color wheel angle. The angle is kept in thousandths of a
 * degree so that repeated stepping wraps exactly instead of drifting.
 */

const MILLIDEGREES_PER_TURN: u32 = 360_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HueCycle {
    millidegrees: u32,
    step: u32,
}

impl HueCycle {
    // Start at 0 degrees, advancing by step_degrees per frame
    pub fn new(step_degrees: f32) -> Self {
        Self {
            millidegrees: 0,
            step: to_millidegrees(step_degrees),
        }
    }

    // Current hue in degrees, always in [0, 360)
    pub fn degrees(&self) -> f32 {
        self.millidegrees as f32 / 1000.0
    }

    pub fn step_degrees(&self) -> f32 {
        self.step as f32 / 1000.0
    }

    pub fn set_step(&mut self, step_degrees: f32) {
        self.step = to_millidegrees(step_degrees);
    }

    pub fn advance(&mut self) {
        self.millidegrees = (self.millidegrees + self.step) % MILLIDEGREES_PER_TURN;
    }
}

// A non-zero step finer than a millidegree would leave the hue standing still
pub fn is_resolvable_step(step_degrees: f32) -> bool {
    step_degrees == 0.0 || to_millidegrees(step_degrees) != 0
}

fn to_millidegrees(degrees: f32) -> u32 {
    // rem_euclid keeps negative steps on the wheel; `as` saturates NaN to 0
    ((degrees.rem_euclid(360.0) * 1000.0).round() as u32) % MILLIDEGREES_PER_TURN
}
