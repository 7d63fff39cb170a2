//! Game-specific error types.
//!
//! Gameplay operations never fail with an error: a rejected shot or reload is
//! a plain `false`.  Errors only exist at the edges, where the game reads its
//! configuration from disk.  Those paths return [`GameResult`] and the Bevy
//! startup system degrades to compiled defaults instead of aborting.

use std::fmt;

/// Top-level error enum for configuration loading and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// OS error text.
        message: String,
    },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        /// Path of the offending file.
        path: String,
        /// Parser error text (includes line/column).
        message: String,
    },

    /// A tunable is outside the range the simulation can honour.
    InvalidConfig {
        /// Name of the config field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, message } => {
                write!(f, "could not read config '{}': {}", path, message)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "could not parse config '{}': {}", path, message)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is invalid (expected {})",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0, ∞)",
        })
    }
}

/// Returns an error unless `value` is zero or positive.
pub fn ensure_non_negative(name: &'static str, value: f64) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `[0, 1]`.
pub fn ensure_unit_interval(name: &'static str, value: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(ensure_unit_interval("lerp", 0.0).is_ok());
        assert!(ensure_unit_interval("lerp", 1.0).is_ok());
        assert!(ensure_unit_interval("lerp", 1.01).is_err());
    }

    #[test]
    fn display_names_the_offending_field() {
        let err = ensure_non_negative("corpse_lifetime", -1.0).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("corpse_lifetime"));
        assert!(text.contains("-1"));
    }
}
