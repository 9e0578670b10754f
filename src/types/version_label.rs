// ABOUTME: Version label validation.
// ABOUTME: Labels are opaque build identifiers compared byte-for-byte.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionLabelError {
    #[error("version label cannot be empty")]
    Empty,

    #[error("version label exceeds maximum length of 100 characters")]
    TooLong,

    #[error("invalid character in version label: '{0}'")]
    InvalidChar(char),
}

/// An opaque identifier tagging a specific build artifact registered with
/// the platform. Equality is exact: the reconciliation loop compares the
/// desired label against the environment's reported label byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionLabel(String);

impl VersionLabel {
    pub fn new(value: &str) -> Result<Self, VersionLabelError> {
        if value.is_empty() {
            return Err(VersionLabelError::Empty);
        }

        if value.len() > 100 {
            return Err(VersionLabelError::TooLong);
        }

        for c in value.chars() {
            if c == '/' || c.is_whitespace() || c.is_control() {
                return Err(VersionLabelError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
