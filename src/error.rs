// ABOUTME: Application-wide error types for stelno.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::control::ControlPlaneError;
use crate::credentials::CredentialError;
use crate::deploy::DeployError;
use crate::types::{ApplicationNameError, EnvironmentNameError, VersionLabelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("timeout must be at least one minute")]
    ZeroTimeout,

    #[error("at least one target environment is required")]
    NoEnvironments,

    #[error("bucket and bucket-key must be provided together")]
    PartialSourceBundle,

    #[error(transparent)]
    Application(#[from] ApplicationNameError),

    #[error(transparent)]
    Environment(#[from] EnvironmentNameError),

    #[error(transparent)]
    Version(#[from] VersionLabelError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

pub type Result<T> = std::result::Result<T, Error>;
