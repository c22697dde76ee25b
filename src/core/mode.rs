//! Run mode selection
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the run mode
pub const MODE_ENV_VAR: &str = "BOT_ENV";

/// Where slash commands get registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every command registered globally
    Development,
    /// Per-guild subsets from the guild group table
    Production,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("BOT_ENV is not set to \"development\" or \"production\"")]
    Unset,
    #[error("BOT_ENV is set to \"{0}\", expected \"development\" or \"production\"")]
    Invalid(String),
}

impl RunMode {
    /// Read the run mode from `BOT_ENV`
    pub fn from_env() -> Result<Self, ModeError> {
        Self::from_value(std::env::var(MODE_ENV_VAR).ok())
    }

    /// Resolve the mode from the raw variable, `None` when it is unset
    pub fn from_value(value: Option<String>) -> Result<Self, ModeError> {
        match value {
            Some(value) => value.parse(),
            None => Err(ModeError::Unset),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

impl FromStr for RunMode {
    type Err = ModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" | "dev" => Ok(RunMode::Development),
            "production" => Ok(RunMode::Production),
            "" => Err(ModeError::Unset),
            other => Err(ModeError::Invalid(other.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("development".parse(), Ok(RunMode::Development));
        assert_eq!("dev".parse(), Ok(RunMode::Development));
        assert_eq!("production".parse(), Ok(RunMode::Production));
    }

    #[test]
    fn test_parse_rejects_other_values() {
        assert_eq!(
            "staging".parse::<RunMode>(),
            Err(ModeError::Invalid("staging".to_string()))
        );
        // Case matters
        assert!("Production".parse::<RunMode>().is_err());
    }

    #[test]
    fn test_padded_value_is_rejected() {
        assert_eq!(
            " production\n".parse::<RunMode>(),
            Err(ModeError::Invalid(" production\n".to_string()))
        );
        assert!("dev ".parse::<RunMode>().is_err());
    }

    #[test]
    fn test_unset_variable_is_fatal() {
        assert_eq!(RunMode::from_value(None), Err(ModeError::Unset));
        assert_eq!(
            RunMode::from_value(Some("production".to_string())),
            Ok(RunMode::Production)
        );
    }

    #[test]
    fn test_parse_empty_is_unset() {
        assert_eq!("".parse::<RunMode>(), Err(ModeError::Unset));
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(RunMode::Production.to_string(), "production");
        assert_eq!(RunMode::Development.to_string(), "development");
    }
}
