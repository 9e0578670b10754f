// ABOUTME: Credential resolution for the control plane.
// ABOUTME: Static keys from the invocation, or ambient instance-role credentials.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Link-local metadata service queried when no static keys are supplied.
const METADATA_ENDPOINT: &str = "http://169.254.169.254";
const METADATA_TIMEOUT: Duration = Duration::from_secs(2);

/// An access/secret key pair accepted by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("instance metadata request failed: {0}")]
    MetadataUnavailable(String),

    #[error("instance metadata returned a malformed credential document: {0}")]
    MalformedDocument(String),
}

/// One-operation credential source, selected before the client is built.
///
/// The deployment core never inspects which implementation it received;
/// static vs. ambient is decided once, at invocation time.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn resolve(&self) -> Result<Credentials, CredentialError>;
}

/// Keys passed explicitly on the invocation.
pub struct StaticProvider {
    credentials: Credentials,
}

impl StaticProvider {
    pub fn new(access_key: String, secret_key: String) -> Self {
        Self {
            credentials: Credentials {
                access_key,
                secret_key,
            },
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticProvider {
    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        Ok(self.credentials.clone())
    }
}

/// Instance-role credentials from the host's metadata service.
pub struct AmbientProvider {
    metadata_endpoint: String,
}

#[derive(Deserialize)]
struct CredentialDocument {
    access_key: String,
    secret_key: String,
}

impl AmbientProvider {
    pub fn new() -> Self {
        Self::with_endpoint(METADATA_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            metadata_endpoint: endpoint.into(),
        }
    }
}

impl Default for AmbientProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for AmbientProvider {
    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        let client = reqwest::Client::builder()
            .timeout(METADATA_TIMEOUT)
            .build()
            .map_err(|e| CredentialError::MetadataUnavailable(e.to_string()))?;

        let url = format!("{}/latest/credentials", self.metadata_endpoint);
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| CredentialError::MetadataUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CredentialError::MetadataUnavailable(e.to_string()))?;

        let document: CredentialDocument = response
            .json()
            .await
            .map_err(|e| CredentialError::MalformedDocument(e.to_string()))?;

        Ok(Credentials {
            access_key: document.access_key,
            secret_key: document.secret_key,
        })
    }
}

/// Pick the provider for an invocation: static when both keys are present,
/// otherwise the host's instance role.
pub fn provider_for(
    access_key: Option<String>,
    secret_key: Option<String>,
) -> Box<dyn CredentialProvider> {
    match (access_key, secret_key) {
        (Some(access_key), Some(secret_key)) => {
            Box::new(StaticProvider::new(access_key, secret_key))
        }
        _ => {
            tracing::warn!(
                "access key and/or secret key not provided, falling back to instance role"
            );
            Box::new(AmbientProvider::new())
        }
    }
}
