/*
 * Field Parameters Module
 *
 * This module defines the FieldParams struct that holds every tunable value of
 * the particle field. Defaults reproduce the stock constellation; any subset
 * can be overridden from a TOML file, and most values can be changed live from
 * the control panel. It also provides snapshot-based change detection so the
 * app can tell a cosmetic tweak from a change that needs a respawn.
 */

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::color::Rgba;
use crate::error::{FieldError, FieldResult};
use crate::hue;

// How connections between particles are found each frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStrategy {
    // Check every unordered pair
    BruteForce,
    // Bucket particles into a uniform grid and check neighboring cells only
    Grid,
    // Brute force for small fields, grid once the count passes grid_threshold
    Auto,
}

// Parameters for the field that can be adjusted via config or UI
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub particle_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub initial_speed: f32,  // Max magnitude of each initial velocity component
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub damping: f32,
    pub connection_radius: f32,
    pub connection_max_alpha: f32,
    pub connection_width: f32,
    pub hue_step: f32,  // Degrees per frame
    pub saturation: f32,
    pub lightness: f32,
    pub particle_alpha: f32,
    pub trail_color: Rgba,
    pub connection_strategy: ConnectionStrategy,
    pub grid_threshold: usize,
    pub title: String,
    pub subtitle: String,
    pub show_debug: bool,
    pub paused: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    pub(crate) previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug, PartialEq)]
struct ParamSnapshot {
    particle_count: usize,
    attraction_radius: f32,
    attraction_strength: f32,
    damping: f32,
    connection_radius: f32,
    hue_step: f32,
    connection_strategy: ConnectionStrategy,
    show_debug: bool,
    paused: bool,
}

// Result of comparing the current values against the last snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub count_changed: bool,
    pub any_changed: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: 80,
            min_radius: 1.0,
            max_radius: 3.0,
            initial_speed: 0.25,
            attraction_radius: 200.0,
            attraction_strength: 0.05,
            damping: 0.99,
            connection_radius: 120.0,
            connection_max_alpha: 0.3,
            connection_width: 0.5,
            hue_step: 0.3,
            saturation: 0.8,
            lightness: 0.7,
            particle_alpha: 0.8,
            trail_color: Rgba::new(10, 10, 20, 0.1),
            connection_strategy: ConnectionStrategy::Auto,
            grid_threshold: 200,
            title: "ETHEREAL".to_string(),
            subtitle: "MOVE TO INTERACT".to_string(),
            show_debug: false,
            paused: false,
            previous_values: None,
        }
    }
}

impl FieldParams {
    // Parse parameters from TOML text; keys that are absent keep their defaults
    pub fn from_toml_str(contents: &str, origin: &str) -> FieldResult<Self> {
        let params: FieldParams = toml::from_str(contents).map_err(|e| FieldError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    // Load parameters from a TOML file. A missing file is not an error.
    pub fn load(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let params = Self::from_toml_str(&contents, &path.display().to_string())?;
                info!(path = %path.display(), "loaded field config");
                Ok(params)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no field config found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(FieldError::Config {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    // Reject values the physics or renderer cannot work with
    pub fn validate(&self) -> FieldResult<()> {
        check("min_radius", self.min_radius, self.min_radius > 0.0, "a positive radius")?;
        check(
            "max_radius",
            self.max_radius,
            self.max_radius >= self.min_radius,
            "a radius no smaller than min_radius",
        )?;
        check("initial_speed", self.initial_speed, self.initial_speed >= 0.0, "a non-negative speed")?;
        check(
            "attraction_radius",
            self.attraction_radius,
            self.attraction_radius > 0.0,
            "a positive radius",
        )?;
        check(
            "attraction_strength",
            self.attraction_strength,
            self.attraction_strength >= 0.0,
            "a non-negative strength",
        )?;
        check("damping", self.damping, self.damping > 0.0 && self.damping <= 1.0, "a value in (0, 1]")?;
        check(
            "connection_radius",
            self.connection_radius,
            self.connection_radius > 0.0,
            "a positive radius",
        )?;
        check(
            "connection_width",
            self.connection_width,
            self.connection_width > 0.0,
            "a positive width",
        )?;
        check(
            "hue_step",
            self.hue_step,
            (0.0..360.0).contains(&self.hue_step) && hue::is_resolvable_step(self.hue_step),
            "0 or degrees in [0.001, 360)",
        )?;
        for (name, value) in [
            ("connection_max_alpha", self.connection_max_alpha),
            ("saturation", self.saturation),
            ("lightness", self.lightness),
            ("particle_alpha", self.particle_alpha),
            ("trail_color.alpha", self.trail_color.alpha),
        ] {
            check(name, value, (0.0..=1.0).contains(&value), "a value in [0, 1]")?;
        }
        Ok(())
    }

    // Resolve Auto against the particle count
    pub fn uses_grid(&self) -> bool {
        match self.connection_strategy {
            ConnectionStrategy::BruteForce => false,
            ConnectionStrategy::Grid => true,
            ConnectionStrategy::Auto => self.particle_count > self.grid_threshold,
        }
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            particle_count: self.particle_count,
            attraction_radius: self.attraction_radius,
            attraction_strength: self.attraction_strength,
            damping: self.damping,
            connection_radius: self.connection_radius,
            hue_step: self.hue_step,
            connection_strategy: self.connection_strategy,
            show_debug: self.show_debug,
            paused: self.paused,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Check if any parameters have changed since the last snapshot
    pub fn detect_changes(&self) -> ParamChanges {
        // If we don't have previous values, nothing has changed
        match &self.previous_values {
            Some(prev) => {
                let current = self.snapshot();
                ParamChanges {
                    count_changed: current.particle_count != prev.particle_count,
                    any_changed: current != *prev,
                }
            }
            None => ParamChanges::default(),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        10..=3000
    }

    pub fn get_attraction_radius_range() -> std::ops::RangeInclusive<f32> {
        20.0..=600.0
    }

    pub fn get_attraction_strength_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_damping_range() -> std::ops::RangeInclusive<f32> {
        0.9..=1.0
    }

    pub fn get_connection_radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=300.0
    }

    pub fn get_hue_step_range() -> std::ops::RangeInclusive<f32> {
        0.0..=5.0
    }
}

fn check(name: &'static str, value: f32, ok: bool, expected: &'static str) -> FieldResult<()> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter { name, value, expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = FieldParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.particle_count, 80);
        assert!(!params.uses_grid());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let params = FieldParams::from_toml_str(
            "particle_count = 300\nconnection_strategy = \"brute_force\"\n",
            "inline",
        )
        .unwrap();

        assert_eq!(params.particle_count, 300);
        assert_eq!(params.connection_strategy, ConnectionStrategy::BruteForce);
        assert_eq!(params.connection_radius, 120.0);
        assert_eq!(params.trail_color, Rgba::new(10, 10, 20, 0.1));
    }

    #[test]
    fn trail_color_table_is_parsed() {
        let params = FieldParams::from_toml_str(
            "[trail_color]\nred = 0\ngreen = 0\nblue = 0\nalpha = 0.25\n",
            "inline",
        )
        .unwrap();
        assert_eq!(params.trail_color, Rgba::new(0, 0, 0, 0.25));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = FieldParams::from_toml_str("particle_count = \"many\"", "inline").unwrap_err();
        assert!(matches!(err, FieldError::Config { .. }));
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let err = FieldParams::from_toml_str("damping = 1.5", "inline").unwrap_err();
        match err {
            FieldError::InvalidParameter { name, .. } => assert_eq!(name, "damping"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hue_step_finer_than_a_millidegree_is_rejected() {
        let err = FieldParams::from_toml_str("hue_step = 0.0002", "inline").unwrap_err();
        match err {
            FieldError::InvalidParameter { name, .. } => assert_eq!(name, "hue_step"),
            other => panic!("unexpected error: {other}"),
        }

        let still = FieldParams::from_toml_str("hue_step = 0.0", "inline").unwrap();
        assert_eq!(still.hue_step, 0.0);
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let params = FieldParams {
            min_radius: 4.0,
            max_radius: 2.0,
            ..FieldParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let params = FieldParams::load("does/not/exist/field.toml").unwrap();
        assert_eq!(params.particle_count, 80);
    }

    #[test]
    fn auto_strategy_switches_to_grid_above_threshold() {
        let params = FieldParams {
            particle_count: 201,
            ..FieldParams::default()
        };
        assert!(params.uses_grid());
    }

    #[test]
    fn change_detection_separates_count_from_other_changes() {
        let mut params = FieldParams::default();
        assert_eq!(params.detect_changes(), ParamChanges::default());

        params.take_snapshot();
        params.connection_radius = 90.0;
        assert_eq!(
            params.detect_changes(),
            ParamChanges { count_changed: false, any_changed: true }
        );

        params.take_snapshot();
        params.particle_count = 120;
        assert_eq!(
            params.detect_changes(),
            ParamChanges { count_changed: true, any_changed: true }
        );

        params.take_snapshot();
        assert_eq!(params.detect_changes(), ParamChanges::default());
    }
}
