//! Error types for bloom-core.
//!
//! The simulation itself cannot fail once constructed; the only fallible
//! operations are building a flower or wind field from configuration and
//! parsing settings documents.

use std::fmt;

/// Errors raised while validating or loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A value that is used as a mass, divisor or duration was zero or negative.
    NonPositive { field: &'static str, value: f32 },
    /// A value was NaN or infinite.
    NonFinite { field: &'static str },
    /// A value fell outside its allowed range.
    InvalidRange { field: &'static str, value: f32 },
    /// The settings document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "`{}` must be positive, got {}", field, value)
            }
            ConfigError::NonFinite { field } => write!(f, "`{}` must be finite", field),
            ConfigError::InvalidRange { field, value } => {
                write!(f, "`{}` is out of range: {}", field, value)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

/// Checks that `value` is finite and not negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidRange { field, value });
    }
    Ok(())
}

/// Checks that `value` lies in `[0, 1]`.
pub(crate) fn ensure_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidRange { field, value });
    }
    Ok(())
}

pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    Ok(())
}
