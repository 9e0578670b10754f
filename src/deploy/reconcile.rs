// ABOUTME: The polling reconciliation loop.
// ABOUTME: Races a fixed poll cadence against a one-shot deadline.

use crate::control::{ControlPlane, ControlPlaneError, EnvironmentSnapshot, EnvironmentStatus};
use crate::types::{ApplicationName, EnvironmentName, VersionLabel};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use super::outcome::ReconciliationOutcome;

/// Cadence of environment polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What the loop is waiting for.
#[derive(Debug, Clone, Copy)]
pub enum Goal<'a> {
    /// Wait for the environment to report Ready, ignoring its version.
    /// Used as a pre-check before mutating an environment.
    Ready,

    /// Wait for the environment to report Ready at the given version.
    Version(&'a VersionLabel),
}

/// Poll the environment until it reaches a terminal classification or the
/// deadline elapses.
///
/// Each tick fetches a fresh snapshot and the latest event, logs them, and
/// classifies. The loop issues no mutations; a control-plane failure on any
/// poll aborts immediately through the error channel. Overrun past the
/// deadline is bounded by at most one in-flight poll.
pub async fn reconcile<C>(
    client: &C,
    application: &ApplicationName,
    environment: &EnvironmentName,
    goal: Goal<'_>,
    timeout: Duration,
) -> Result<ReconciliationOutcome, ControlPlaneError>
where
    C: ControlPlane + ?Sized,
{
    let started = tokio::time::Instant::now();

    // First poll lands one interval after loop entry: the update was just
    // requested and the platform will not have settled instantly.
    let mut ticks = tokio::time::interval_at(started + POLL_INTERVAL, POLL_INTERVAL);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            // The tick is serviced first, so a snapshot landing exactly on
            // the deadline still gets classified.
            biased;

            _ = ticks.tick() => {
                let snapshot = client.describe_environment(application, environment).await?;
                let event = client.describe_latest_event(application, environment).await?;
                let last_event = event.map(|e| e.message);

                tracing::info!(
                    environment = %environment,
                    status = %snapshot.status,
                    health = %snapshot.health,
                    version = snapshot.version_label.as_deref().unwrap_or(""),
                    event = last_event.as_deref().unwrap_or(""),
                    "polled environment"
                );

                if let Some(outcome) = classify(goal, &snapshot, last_event) {
                    return Ok(outcome);
                }
            }

            _ = &mut deadline => {
                return Ok(ReconciliationOutcome::TimedOut {
                    waited: started.elapsed(),
                });
            }
        }
    }
}

/// Classify a snapshot against the goal. `None` means keep polling.
fn classify(
    goal: Goal<'_>,
    snapshot: &EnvironmentSnapshot,
    last_event: Option<String>,
) -> Option<ReconciliationOutcome> {
    match snapshot.status {
        EnvironmentStatus::Ready => match goal {
            Goal::Ready => Some(ReconciliationOutcome::Succeeded),
            Goal::Version(expected) => {
                if snapshot.version_label.as_deref() == Some(expected.as_str()) {
                    Some(ReconciliationOutcome::Succeeded)
                } else {
                    Some(ReconciliationOutcome::VersionMismatch {
                        expected: expected.clone(),
                        observed: snapshot.version_label.clone(),
                    })
                }
            }
        },

        EnvironmentStatus::Updating => None,

        // A freshly created environment boots through Launching; only the
        // pre-check waits across that.
        EnvironmentStatus::Launching if matches!(goal, Goal::Ready) => None,

        _ => Some(ReconciliationOutcome::UnexpectedStatus {
            status: snapshot.status.clone(),
            health: snapshot.health.clone(),
            last_event,
        }),
    }
}
