// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-memory control plane for integration tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use stelno::control::{
    ControlPlane, ControlPlaneError, CreateVersionRequest, EnvironmentHealth,
    EnvironmentSnapshot, EnvironmentStatus, RecentEvent, VersionHandle,
};
use stelno::types::{ApplicationName, EnvironmentName, VersionLabel};

/// One scripted reply to a describe_environment call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Step {
    Snapshot {
        status: EnvironmentStatus,
        version: Option<String>,
    },
    Fail,
}

#[allow(dead_code)]
pub fn updating() -> Step {
    Step::Snapshot {
        status: EnvironmentStatus::Updating,
        version: None,
    }
}

#[allow(dead_code)]
pub fn launching() -> Step {
    Step::Snapshot {
        status: EnvironmentStatus::Launching,
        version: None,
    }
}

#[allow(dead_code)]
pub fn ready(version: &str) -> Step {
    Step::Snapshot {
        status: EnvironmentStatus::Ready,
        version: Some(version.to_string()),
    }
}

#[allow(dead_code)]
pub fn status(status: EnvironmentStatus) -> Step {
    Step::Snapshot {
        status,
        version: None,
    }
}

#[allow(dead_code)]
pub fn describe_error() -> Step {
    Step::Fail
}

/// In-memory control plane serving pre-programmed snapshots per environment
/// and recording every mutation it receives.
///
/// The last step of a script is sticky: once reached, every further poll
/// observes it again, so "never leaves Updating" is a one-step script.
#[derive(Default)]
pub struct ScriptedControlPlane {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    polls: Mutex<HashMap<String, usize>>,
    create_calls: Mutex<Vec<String>>,
    update_calls: Mutex<Vec<(String, String)>>,
    fail_create: bool,
    fail_update: bool,
    event_message: Option<String>,
}

#[allow(dead_code)]
impl ScriptedControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the snapshot sequence one environment will report.
    pub fn script(self, environment: &str, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(environment.to_string(), steps.into());
        self
    }

    /// Make every create_version call fail with an API rejection.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make every update_environment call fail with an API rejection.
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Serve this message as the latest event on every poll.
    pub fn with_event(mut self, message: &str) -> Self {
        self.event_message = Some(message.to_string());
        self
    }

    /// How many times the given environment was described.
    pub fn polls(&self, environment: &str) -> usize {
        self.polls
            .lock()
            .unwrap()
            .get(environment)
            .copied()
            .unwrap_or(0)
    }

    /// Version labels passed to create_version, in call order.
    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }

    /// (environment, version) pairs passed to update_environment, in order.
    pub fn update_calls(&self) -> Vec<(String, String)> {
        self.update_calls.lock().unwrap().clone()
    }

    fn next_step(&self, environment: &str) -> Option<Step> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(environment)?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn create_version(
        &self,
        request: &CreateVersionRequest,
    ) -> Result<VersionHandle, ControlPlaneError> {
        self.create_calls
            .lock()
            .unwrap()
            .push(request.version_label.as_str().to_string());

        if self.fail_create {
            return Err(ControlPlaneError::Api {
                status: 409,
                message: "version label already exists".to_string(),
            });
        }

        Ok(VersionHandle {
            application: request.application.as_str().to_string(),
            version_label: request.version_label.as_str().to_string(),
        })
    }

    async fn update_environment(
        &self,
        _application: &ApplicationName,
        environment: &EnvironmentName,
        version: &VersionLabel,
        _description: &str,
    ) -> Result<(), ControlPlaneError> {
        self.update_calls
            .lock()
            .unwrap()
            .push((environment.as_str().to_string(), version.as_str().to_string()));

        if self.fail_update {
            return Err(ControlPlaneError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }

        Ok(())
    }

    async fn describe_environment(
        &self,
        _application: &ApplicationName,
        environment: &EnvironmentName,
    ) -> Result<EnvironmentSnapshot, ControlPlaneError> {
        *self
            .polls
            .lock()
            .unwrap()
            .entry(environment.as_str().to_string())
            .or_insert(0) += 1;

        let step = self
            .next_step(environment.as_str())
            .ok_or_else(|| ControlPlaneError::NotFound {
                resource: format!("environment {environment}"),
            })?;

        match step {
            Step::Snapshot { status, version } => Ok(EnvironmentSnapshot {
                name: environment.as_str().to_string(),
                status,
                health: EnvironmentHealth::Green,
                version_label: version,
            }),
            Step::Fail => Err(ControlPlaneError::Api {
                status: 503,
                message: "describe unavailable".to_string(),
            }),
        }
    }

    async fn describe_latest_event(
        &self,
        _application: &ApplicationName,
        _environment: &EnvironmentName,
    ) -> Result<Option<RecentEvent>, ControlPlaneError> {
        Ok(self.event_message.as_ref().map(|message| RecentEvent {
            timestamp: Utc::now(),
            severity: Some("INFO".to_string()),
            message: message.clone(),
        }))
    }
}
