/*
 * Error Module
 *
 * Errors raised while mounting or configuring a particle field.
 * Nothing inside a running frame can fail; every variant here is produced
 * either at mount time or while loading and validating FieldParams.
 */

use std::fmt;

#[derive(Debug)]
pub enum FieldError {
    // The host could not provide a drawing surface of usable size
    SurfaceUnavailable {
        reason: String,
    },

    // A parameter is outside the range the field can work with.
    // `name` is the key as it appears in the config file.
    InvalidParameter {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    // A configuration file exists but could not be read or parsed
    Config {
        path: String,
        message: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::SurfaceUnavailable { reason } => {
                write!(f, "drawing surface unavailable: {}", reason)
            }
            FieldError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(
                f,
                "parameter '{}' = {} is invalid, expected {}",
                name, value, expected
            ),
            FieldError::Config { path, message } => {
                write!(f, "failed to load config '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for FieldError {}

pub type FieldResult<T> = Result<T, FieldError>;
