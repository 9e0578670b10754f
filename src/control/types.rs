// ABOUTME: Wire and data types exchanged with the control plane.
// ABOUTME: Environment snapshots, events, version handles, and status enums.

use crate::types::{ApplicationName, VersionLabel};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Remote-defined lifecycle status of an environment.
///
/// The platform reports statuses as strings; values outside the known set
/// are preserved verbatim so terminal reports can show what was observed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EnvironmentStatus {
    Ready,
    Updating,
    Launching,
    Terminating,
    Terminated,
    Other(String),
}

impl From<String> for EnvironmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Ready" => EnvironmentStatus::Ready,
            "Updating" => EnvironmentStatus::Updating,
            "Launching" => EnvironmentStatus::Launching,
            "Terminating" => EnvironmentStatus::Terminating,
            "Terminated" => EnvironmentStatus::Terminated,
            _ => EnvironmentStatus::Other(value),
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnvironmentStatus::Ready => "Ready",
            EnvironmentStatus::Updating => "Updating",
            EnvironmentStatus::Launching => "Launching",
            EnvironmentStatus::Terminating => "Terminating",
            EnvironmentStatus::Terminated => "Terminated",
            EnvironmentStatus::Other(other) => other,
        };
        write!(f, "{s}")
    }
}

/// Remote-defined health indicator of an environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EnvironmentHealth {
    Green,
    Yellow,
    Red,
    Grey,
    Other(String),
}

impl From<String> for EnvironmentHealth {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Green" => EnvironmentHealth::Green,
            "Yellow" => EnvironmentHealth::Yellow,
            "Red" => EnvironmentHealth::Red,
            "Grey" => EnvironmentHealth::Grey,
            _ => EnvironmentHealth::Other(value),
        }
    }
}

impl fmt::Display for EnvironmentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnvironmentHealth::Green => "Green",
            EnvironmentHealth::Yellow => "Yellow",
            EnvironmentHealth::Red => "Red",
            EnvironmentHealth::Grey => "Grey",
            EnvironmentHealth::Other(other) => other,
        };
        write!(f, "{s}")
    }
}

/// A point-in-time read of one remote environment.
///
/// Fetched fresh on every poll tick; never cached across ticks. The
/// version label is absent on environments that have never run a version.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSnapshot {
    pub name: String,
    pub status: EnvironmentStatus,
    pub health: EnvironmentHealth,
    #[serde(default)]
    pub version_label: Option<String>,
}

/// The most recent diagnostic event recorded for an environment.
/// Used for error context only; never drives control flow.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub severity: Option<String>,
    pub message: String,
}

/// Location of a packaged artifact in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBundle {
    pub bucket: String,
    pub key: String,
}

/// Input to version registration.
#[derive(Debug, Clone)]
pub struct CreateVersionRequest {
    pub application: ApplicationName,
    pub version_label: VersionLabel,
    pub description: String,
    pub source_bundle: SourceBundle,
    /// Create the application implicitly if it does not exist yet.
    pub auto_create: bool,
    /// Ask the platform to preprocess and validate the artifact manifest.
    pub process: bool,
}

/// The control plane's record of a registered version.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionHandle {
    pub application: String,
    pub version_label: String,
}
