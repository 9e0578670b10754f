// ABOUTME: Application name validation.
// ABOUTME: Rejects empty names, overlong names, and path-corrupting characters.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationNameError {
    #[error("application name cannot be empty")]
    Empty,

    #[error("application name exceeds maximum length of 100 characters")]
    TooLong,

    #[error("invalid character in application name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationName(String);

impl ApplicationName {
    pub fn new(value: &str) -> Result<Self, ApplicationNameError> {
        if value.is_empty() {
            return Err(ApplicationNameError::Empty);
        }

        if value.len() > 100 {
            return Err(ApplicationNameError::TooLong);
        }

        // Names travel in request paths; separators and control characters
        // would change the resource being addressed.
        for c in value.chars() {
            if c == '/' || c.is_control() {
                return Err(ApplicationNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
