// ABOUTME: Control-plane error types with SNAFU pattern.
// ABOUTME: Transport, auth, not-found, decode, and API rejection failures.

use snafu::Snafu;

/// Failures from control-plane calls.
///
/// Every variant is immediately fatal to the invocation: the tool performs
/// no retries of its own, deferring to whatever the CI system does with a
/// failed job.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ControlPlaneError {
    #[snafu(display("control plane request failed: {source}"))]
    Transport { source: reqwest::Error },

    #[snafu(display("control plane rejected the provided credentials"))]
    Unauthorized,

    #[snafu(display("{resource} not found"))]
    NotFound { resource: String },

    #[snafu(display("control plane returned {status}: {message}"))]
    Api { status: u16, message: String },

    #[snafu(display("malformed control plane response: {source}"))]
    Decode { source: reqwest::Error },
}
