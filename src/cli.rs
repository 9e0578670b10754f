// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every flag also binds an STELNO_* environment variable for CI use.

use clap::Parser;
use nonempty::NonEmpty;
use std::time::Duration;
use stelno::config::DeployRequest;
use stelno::control::SourceBundle;
use stelno::error::{Error, Result};
use stelno::types::{ApplicationName, EnvironmentName, VersionLabel};

#[derive(Debug, Parser)]
#[command(name = "stelno")]
#[command(about = "Deploy an application version to managed platform environments")]
#[command(version)]
pub struct Cli {
    /// Platform region hosting the application
    #[arg(long, env = "STELNO_REGION", default_value = stelno::config::DEFAULT_REGION)]
    pub region: String,

    /// Access key for the control plane (omit to use the instance role)
    #[arg(long, env = "STELNO_ACCESS_KEY")]
    pub access_key: Option<String>,

    /// Secret key paired with the access key
    #[arg(long, env = "STELNO_SECRET_KEY")]
    pub secret_key: Option<String>,

    /// Bucket holding the packaged artifact
    #[arg(long, env = "STELNO_BUCKET")]
    pub bucket: Option<String>,

    /// Object key of the packaged artifact within the bucket
    #[arg(long, env = "STELNO_BUCKET_KEY")]
    pub bucket_key: Option<String>,

    /// Application to deploy
    #[arg(long, env = "STELNO_APPLICATION")]
    pub application: String,

    /// Target environment; repeat for several, updated in order
    #[arg(long = "environment", env = "STELNO_ENVIRONMENTS", value_delimiter = ',')]
    pub environments: Vec<String>,

    /// Version label to register and roll out
    #[arg(long, env = "STELNO_VERSION_LABEL")]
    pub version_label: String,

    /// Human description recorded on the version
    #[arg(long, env = "STELNO_DESCRIPTION", default_value = "")]
    pub description: String,

    /// Create the application on version registration if it does not exist
    #[arg(long, env = "STELNO_AUTO_CREATE")]
    pub auto_create: bool,

    /// Ask the platform to preprocess and validate the artifact manifest
    #[arg(long, env = "STELNO_PROCESS")]
    pub process: bool,

    /// Roll the target environments to the new version and wait for them
    #[arg(long, env = "STELNO_ENVIRONMENT_UPDATE")]
    pub environment_update: bool,

    /// Wait for each environment to report Ready before touching it
    #[arg(long, env = "STELNO_WAIT_READY")]
    pub wait_ready: bool,

    /// Deploy timeout in minutes
    #[arg(long, env = "STELNO_TIMEOUT", default_value_t = stelno::config::DEFAULT_TIMEOUT_MINUTES)]
    pub timeout: u64,

    /// Control-plane endpoint override (defaults to the regional endpoint)
    #[arg(long, env = "STELNO_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate the invocation into an immutable request.
    /// Fails before any remote call is made.
    pub fn into_request(self) -> Result<DeployRequest> {
        if self.timeout == 0 {
            return Err(Error::ZeroTimeout);
        }

        let application = ApplicationName::new(&self.application)?;
        let version_label = VersionLabel::new(&self.version_label)?;

        let environments = self
            .environments
            .iter()
            .map(|name| EnvironmentName::new(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let environments = NonEmpty::from_vec(environments).ok_or(Error::NoEnvironments)?;

        let source_bundle = match (self.bucket, self.bucket_key) {
            (Some(bucket), Some(key)) => Some(SourceBundle { bucket, key }),
            (None, None) => None,
            _ => return Err(Error::PartialSourceBundle),
        };

        Ok(DeployRequest {
            region: self.region,
            access_key: self.access_key,
            secret_key: self.secret_key,
            source_bundle,
            application,
            environments,
            version_label,
            description: self.description,
            auto_create: self.auto_create,
            process: self.process,
            environment_update: self.environment_update,
            wait_until_ready: self.wait_ready,
            timeout: Duration::from_secs(self.timeout * 60),
            endpoint: self.endpoint,
        })
    }
}
