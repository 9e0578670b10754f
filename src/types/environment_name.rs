// ABOUTME: Environment name validation following platform naming rules.
// ABOUTME: Names are 4-40 chars of letters, digits, and interior hyphens.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvironmentNameError {
    #[error("environment name must be at least 4 characters")]
    TooShort,

    #[error("environment name exceeds maximum length of 40 characters")]
    TooLong,

    #[error("environment name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("environment name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("invalid character in environment name: '{0}'")]
    InvalidChar(char),
}

/// A named, independently deployable running instance of an application
/// on the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    pub fn new(value: &str) -> Result<Self, EnvironmentNameError> {
        if value.len() < 4 {
            return Err(EnvironmentNameError::TooShort);
        }

        if value.len() > 40 {
            return Err(EnvironmentNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(EnvironmentNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(EnvironmentNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(EnvironmentNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
