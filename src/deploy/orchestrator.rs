// ABOUTME: Per-environment deployment sequencing.
// ABOUTME: Optional ready pre-check, version registration, update, reconcile.

use crate::config::DeployRequest;
use crate::control::{ControlPlane, CreateVersionRequest};
use crate::types::EnvironmentName;

use super::error::DeployError;
use super::outcome::ReconciliationOutcome;
use super::reconcile::{reconcile, Goal};

/// Deploy to every target environment, strictly in sequence.
///
/// The first non-success aborts the remaining environments: nothing is
/// mutated on targets after a failed one.
pub async fn run<C>(request: &DeployRequest, client: &C) -> Result<(), DeployError>
where
    C: ControlPlane + ?Sized,
{
    for environment in request.environments.iter() {
        deploy_environment(request, client, environment).await?;
    }

    Ok(())
}

async fn deploy_environment<C>(
    request: &DeployRequest,
    client: &C,
    environment: &EnvironmentName,
) -> Result<(), DeployError>
where
    C: ControlPlane + ?Sized,
{
    if request.wait_until_ready {
        tracing::info!(
            application = %request.application,
            environment = %environment,
            "waiting for environment to be ready before updating"
        );

        let outcome = reconcile(
            client,
            &request.application,
            environment,
            Goal::Ready,
            request.timeout,
        )
        .await?;

        report(environment, &outcome, "environment ready");
        into_result(environment, outcome)?;
    }

    if let Some(bundle) = &request.source_bundle {
        tracing::info!(
            application = %request.application,
            bucket = %bundle.bucket,
            bucket_key = %bundle.key,
            version = %request.version_label,
            auto_create = request.auto_create,
            "creating application version"
        );

        let create = CreateVersionRequest {
            application: request.application.clone(),
            version_label: request.version_label.clone(),
            description: request.description.clone(),
            source_bundle: bundle.clone(),
            auto_create: request.auto_create,
            process: request.process,
        };

        match client.create_version(&create).await {
            Ok(handle) => {
                tracing::info!(
                    application = %handle.application,
                    version = %handle.version_label,
                    "registered application version"
                );
            }
            // The label may already be registered from an earlier attempt;
            // when an update was requested, proceed on that assumption.
            Err(err) if request.environment_update => {
                tracing::warn!(
                    version = %request.version_label,
                    error = %err,
                    "version registration failed, continuing with existing label"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    if request.environment_update {
        tracing::info!(
            application = %request.application,
            environment = %environment,
            version = %request.version_label,
            timeout_secs = request.timeout.as_secs(),
            "updating environment"
        );

        client
            .update_environment(
                &request.application,
                environment,
                &request.version_label,
                &request.description,
            )
            .await?;

        tracing::info!(
            environment = %environment,
            "waiting for environment to finish updating"
        );

        let outcome = reconcile(
            client,
            &request.application,
            environment,
            Goal::Version(&request.version_label),
            request.timeout,
        )
        .await?;

        report(environment, &outcome, "update finished successfully");
        into_result(environment, outcome)?;
    }

    Ok(())
}

/// Log the terminal outcome with full context before it is mapped.
fn report(environment: &EnvironmentName, outcome: &ReconciliationOutcome, success_message: &str) {
    match outcome {
        ReconciliationOutcome::Succeeded => {
            tracing::info!(environment = %environment, "{success_message}");
        }
        ReconciliationOutcome::VersionMismatch { expected, observed } => {
            tracing::error!(
                environment = %environment,
                expected = %expected,
                observed = observed.as_deref().unwrap_or(""),
                "environment settled on the wrong version"
            );
        }
        ReconciliationOutcome::UnexpectedStatus {
            status,
            health,
            last_event,
        } => {
            tracing::error!(
                environment = %environment,
                status = %status,
                health = %health,
                event = last_event.as_deref().unwrap_or(""),
                "environment entered unexpected status"
            );
        }
        ReconciliationOutcome::TimedOut { waited } => {
            tracing::error!(
                environment = %environment,
                waited_secs = waited.as_secs(),
                "environment failed to settle before the deadline"
            );
        }
    }
}

fn into_result(
    environment: &EnvironmentName,
    outcome: ReconciliationOutcome,
) -> Result<(), DeployError> {
    match outcome {
        ReconciliationOutcome::Succeeded => Ok(()),
        ReconciliationOutcome::VersionMismatch { expected, observed } => {
            Err(DeployError::VersionMismatch {
                environment: environment.clone(),
                expected,
                observed: observed.unwrap_or_else(|| "<none>".to_string()),
            })
        }
        ReconciliationOutcome::UnexpectedStatus { status, .. } => {
            Err(DeployError::UnexpectedStatus {
                environment: environment.clone(),
                status,
            })
        }
        ReconciliationOutcome::TimedOut { waited } => Err(DeployError::TimedOut {
            environment: environment.clone(),
            waited,
        }),
    }
}
