// ABOUTME: Deployment orchestration: version registration, environment update,
// ABOUTME: and the polling reconciliation loop with its tick/deadline race.

mod error;
mod orchestrator;
mod outcome;
mod reconcile;

pub use error::DeployError;
pub use orchestrator::run;
pub use outcome::ReconciliationOutcome;
pub use reconcile::{reconcile, Goal, POLL_INTERVAL};
