// ABOUTME: Error types for deployment runs.
// ABOUTME: Upstream failures plus the non-success terminal outcomes.

use crate::control::{ControlPlaneError, EnvironmentStatus};
use crate::types::{EnvironmentName, VersionLabel};
use std::time::Duration;
use thiserror::Error;

/// Why a deployment run failed.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A control-plane call failed. Never retried.
    #[error("control plane call failed: {0}")]
    ControlPlane(#[from] ControlPlaneError),

    /// The environment settled at Ready on the wrong version.
    #[error("environment {environment} settled on version '{observed}', expected '{expected}'")]
    VersionMismatch {
        environment: EnvironmentName,
        expected: VersionLabel,
        observed: String,
    },

    /// The environment left the expected in-progress/ready set.
    #[error("environment {environment} entered unexpected status {status}")]
    UnexpectedStatus {
        environment: EnvironmentName,
        status: EnvironmentStatus,
    },

    /// The deadline elapsed before the environment settled.
    #[error("environment {environment} did not settle within {}s", .waited.as_secs())]
    TimedOut {
        environment: EnvironmentName,
        waited: Duration,
    },
}
