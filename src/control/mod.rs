// ABOUTME: Control-plane client abstraction for the hosting platform.
// ABOUTME: Defines the four-operation ControlPlane trait and its HTTP implementation.

mod error;
mod http;
mod types;

pub use error::ControlPlaneError;
pub use http::HttpControlPlane;
pub use types::{
    CreateVersionRequest, EnvironmentHealth, EnvironmentSnapshot, EnvironmentStatus, RecentEvent,
    SourceBundle, VersionHandle,
};

use crate::types::{ApplicationName, EnvironmentName, VersionLabel};
use async_trait::async_trait;

/// Request/response operations against the platform control plane.
///
/// Every call is a single synchronous exchange: no client-side retries
/// beyond what the transport performs transparently. Callers treat any
/// error as fatal to the current invocation.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Register a new deployable version from an uploaded artifact.
    /// May implicitly create the application when the request asks for it.
    async fn create_version(
        &self,
        request: &CreateVersionRequest,
    ) -> Result<VersionHandle, ControlPlaneError>;

    /// Ask the platform to begin rolling the named environment to the given
    /// version. Fire-and-forget: returns as soon as the request is accepted.
    async fn update_environment(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
        version: &VersionLabel,
        description: &str,
    ) -> Result<(), ControlPlaneError>;

    /// Fetch a point-in-time snapshot of one environment.
    async fn describe_environment(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
    ) -> Result<EnvironmentSnapshot, ControlPlaneError>;

    /// Fetch the single most recent diagnostic event for the
    /// application/environment pair, if the platform has recorded any.
    async fn describe_latest_event(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
    ) -> Result<Option<RecentEvent>, ControlPlaneError>;
}
