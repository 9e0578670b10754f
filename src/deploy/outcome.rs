// ABOUTME: Terminal classification of one environment's reconciliation loop.
// ABOUTME: Produced exactly once per target environment.

use crate::control::{EnvironmentHealth, EnvironmentStatus};
use crate::types::VersionLabel;
use std::time::Duration;

/// How the polling loop ended for one environment.
///
/// Upstream failures are not a variant here: a failed control-plane call
/// aborts the loop through the error channel instead of classifying the
/// environment's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// The environment reached its goal: Ready, at the desired version
    /// when one was being watched for.
    Succeeded,

    /// The environment settled at Ready but reports a different version.
    /// The platform has finished rolling; waiting longer cannot help.
    VersionMismatch {
        expected: VersionLabel,
        observed: Option<String>,
    },

    /// The environment left the expected in-progress/ready set, e.g.
    /// it began terminating or entered a degraded state.
    UnexpectedStatus {
        status: EnvironmentStatus,
        health: EnvironmentHealth,
        last_event: Option<String>,
    },

    /// The deadline elapsed before any terminal classification.
    TimedOut { waited: Duration },
}
