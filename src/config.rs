// ABOUTME: Invocation parameters for a deployment run.
// ABOUTME: Immutable after construction; one DeployRequest per CI invocation.

use crate::control::SourceBundle;
use crate::types::{ApplicationName, EnvironmentName, VersionLabel};
use nonempty::NonEmpty;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 20;

/// Everything one deployment run needs, resolved from flags and the
/// environment before any remote call. Never mutated.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,

    /// Artifact location; absent when the version is already registered.
    pub source_bundle: Option<SourceBundle>,

    pub application: ApplicationName,

    /// Targets, updated strictly in order. Never empty.
    pub environments: NonEmpty<EnvironmentName>,

    pub version_label: VersionLabel,
    pub description: String,

    /// Create the application on version registration if missing.
    pub auto_create: bool,
    /// Preprocess and validate the artifact manifest on registration.
    pub process: bool,
    /// Roll the environments to the new version and wait for them.
    pub environment_update: bool,
    /// Wait for each environment to report Ready before touching it.
    pub wait_until_ready: bool,

    /// Deadline for each environment's reconciliation loop.
    pub timeout: Duration,

    /// Explicit control-plane endpoint; region-derived when absent.
    pub endpoint: Option<String>,
}

impl DeployRequest {
    /// The control-plane endpoint this run talks to.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://api.{}.stelno.dev", self.region))
    }
}
