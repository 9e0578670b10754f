// ABOUTME: Production control-plane client over JSON HTTPS.
// ABOUTME: Wraps reqwest with credential auth and typed request/response bodies.

use super::error::{ControlPlaneError, DecodeSnafu, TransportSnafu};
use super::types::{
    CreateVersionRequest, EnvironmentSnapshot, RecentEvent, VersionHandle,
};
use super::ControlPlane;
use crate::credentials::Credentials;
use crate::types::{ApplicationName, EnvironmentName, VersionLabel};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the hosted control plane API.
pub struct HttpControlPlane {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

#[derive(Serialize)]
struct CreateVersionBody<'a> {
    version_label: &'a str,
    description: &'a str,
    source_bundle: SourceBundleBody<'a>,
    auto_create: bool,
    process: bool,
}

#[derive(Serialize)]
struct SourceBundleBody<'a> {
    bucket: &'a str,
    key: &'a str,
}

#[derive(Serialize)]
struct UpdateEnvironmentBody<'a> {
    version_label: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct EventsPage {
    events: Vec<RecentEvent>,
}

impl HttpControlPlane {
    /// Create a client against the given endpoint with resolved credentials.
    pub fn new(
        endpoint: &str,
        credentials: Credentials,
    ) -> Result<Self, ControlPlaneError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(TransportSnafu)?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn environment_path(application: &ApplicationName, environment: &EnvironmentName) -> String {
        format!(
            "/v1/applications/{}/environments/{}",
            urlencoding::encode(application.as_str()),
            urlencoding::encode(environment.as_str()),
        )
    }

    /// Send a request with auth attached and map non-success statuses onto
    /// the error taxonomy. `resource` names what was being addressed, for
    /// not-found reports.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<reqwest::Response, ControlPlaneError> {
        let response = request
            .basic_auth(&self.credentials.access_key, Some(&self.credentials.secret_key))
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ControlPlaneError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(ControlPlaneError::NotFound {
                resource: resource.to_string(),
            }),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(ControlPlaneError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn create_version(
        &self,
        request: &CreateVersionRequest,
    ) -> Result<VersionHandle, ControlPlaneError> {
        let path = format!(
            "/v1/applications/{}/versions",
            urlencoding::encode(request.application.as_str()),
        );
        let body = CreateVersionBody {
            version_label: request.version_label.as_str(),
            description: &request.description,
            source_bundle: SourceBundleBody {
                bucket: &request.source_bundle.bucket,
                key: &request.source_bundle.key,
            },
            auto_create: request.auto_create,
            process: request.process,
        };

        let response = self
            .execute(
                self.client.post(self.url(&path)).json(&body),
                &format!("application {}", request.application),
            )
            .await?;

        response.json().await.context(DecodeSnafu)
    }

    async fn update_environment(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
        version: &VersionLabel,
        description: &str,
    ) -> Result<(), ControlPlaneError> {
        let path = format!(
            "{}/version",
            Self::environment_path(application, environment)
        );
        let body = UpdateEnvironmentBody {
            version_label: version.as_str(),
            description,
        };

        self.execute(
            self.client.post(self.url(&path)).json(&body),
            &format!("environment {environment}"),
        )
        .await?;

        Ok(())
    }

    async fn describe_environment(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
    ) -> Result<EnvironmentSnapshot, ControlPlaneError> {
        let path = Self::environment_path(application, environment);

        let response = self
            .execute(
                self.client.get(self.url(&path)),
                &format!("environment {environment}"),
            )
            .await?;

        response.json().await.context(DecodeSnafu)
    }

    async fn describe_latest_event(
        &self,
        application: &ApplicationName,
        environment: &EnvironmentName,
    ) -> Result<Option<RecentEvent>, ControlPlaneError> {
        let path = format!(
            "{}/events",
            Self::environment_path(application, environment)
        );

        let response = self
            .execute(
                self.client
                    .get(self.url(&path))
                    .query(&[("max_records", "1")]),
                &format!("environment {environment}"),
            )
            .await?;

        let page: EventsPage = response.json().await.context(DecodeSnafu)?;
        Ok(page.events.into_iter().next())
    }
}
