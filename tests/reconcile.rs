// ABOUTME: Timing and classification tests for the reconciliation loop.
// ABOUTME: Runs against a scripted control plane on a paused tokio clock.

mod support;

use std::time::Duration;
use stelno::control::EnvironmentStatus;
use stelno::deploy::{reconcile, Goal, ReconciliationOutcome, POLL_INTERVAL};
use stelno::types::{ApplicationName, EnvironmentName, VersionLabel};
use support::{describe_error, launching, ready, status, updating, ScriptedControlPlane};

fn application() -> ApplicationName {
    ApplicationName::new("shop").unwrap()
}

fn environment() -> EnvironmentName {
    EnvironmentName::new("prod-web").unwrap()
}

fn desired() -> VersionLabel {
    VersionLabel::new("v5").unwrap()
}

// =============================================================================
// Terminal Classification
// =============================================================================

/// Test: Ready with the desired version terminates Succeeded on the first
/// observation, with no further polls.
#[tokio::test(start_paused = true)]
async fn ready_with_desired_version_succeeds_immediately() {
    let plane = ScriptedControlPlane::new().script("prod-web", vec![ready("v5")]);

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    assert_eq!(outcome, ReconciliationOutcome::Succeeded);
    assert_eq!(plane.polls("prod-web"), 1);
}

/// Test: Ready with the wrong version terminates VersionMismatch on the
/// first observation instead of waiting for the deadline.
#[tokio::test(start_paused = true)]
async fn wrong_version_fails_on_first_observation() {
    let plane = ScriptedControlPlane::new().script("prod-web", vec![ready("v4")]);

    let started = tokio::time::Instant::now();
    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ReconciliationOutcome::VersionMismatch {
            expected: desired(),
            observed: Some("v4".to_string()),
        }
    );
    assert_eq!(plane.polls("prod-web"), 1);
    assert_eq!(started.elapsed(), POLL_INTERVAL);
}

/// Test: A status outside the in-progress/ready set terminates
/// UnexpectedStatus on the first observation.
#[tokio::test(start_paused = true)]
async fn unexpected_status_fails_on_first_observation() {
    let plane = ScriptedControlPlane::new()
        .script("prod-web", vec![status(EnvironmentStatus::Terminating)])
        .with_event("instance teardown started");

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    match outcome {
        ReconciliationOutcome::UnexpectedStatus {
            status,
            last_event, ..
        } => {
            assert_eq!(status, EnvironmentStatus::Terminating);
            assert_eq!(last_event.as_deref(), Some("instance teardown started"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
    assert_eq!(plane.polls("prod-web"), 1);
}

/// Test: A failed describe call aborts the loop through the error channel.
#[tokio::test(start_paused = true)]
async fn describe_failure_aborts_the_loop() {
    let plane = ScriptedControlPlane::new().script("prod-web", vec![describe_error()]);

    let result = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(plane.polls("prod-web"), 1);
}

// =============================================================================
// Timing Scenarios
// =============================================================================

/// Test: Updating at t=10s and t=20s, Ready+v5 at t=30s settles Succeeded
/// at t=30s after exactly 3 polls.
#[tokio::test(start_paused = true)]
async fn settles_after_three_polls() {
    let plane = ScriptedControlPlane::new()
        .script("prod-web", vec![updating(), updating(), ready("v5")]);

    let started = tokio::time::Instant::now();
    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(60),
    )
    .await
    .unwrap();

    assert_eq!(outcome, ReconciliationOutcome::Succeeded);
    assert_eq!(plane.polls("prod-web"), 3);
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

/// Test: A Ready observation landing exactly on the deadline still
/// classifies as Succeeded; the tick wins a simultaneous race.
#[tokio::test(start_paused = true)]
async fn observation_on_the_deadline_still_classifies() {
    let plane = ScriptedControlPlane::new()
        .script("prod-web", vec![updating(), updating(), ready("v5")]);

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    assert_eq!(outcome, ReconciliationOutcome::Succeeded);
    assert_eq!(plane.polls("prod-web"), 3);
}

/// Test: An environment that never leaves Updating times out at the
/// deadline with bounded overrun and at most 4 polls.
#[tokio::test(start_paused = true)]
async fn never_ready_times_out_at_deadline() {
    let plane = ScriptedControlPlane::new().script("prod-web", vec![updating()]);

    let started = tokio::time::Instant::now();
    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    match outcome {
        ReconciliationOutcome::TimedOut { waited } => {
            assert!(waited >= Duration::from_secs(30));
            assert!(waited <= Duration::from_secs(30) + POLL_INTERVAL);
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
    assert!(plane.polls("prod-web") <= 4);
    assert!(started.elapsed() <= Duration::from_secs(30) + POLL_INTERVAL);
}

/// Test: A deadline shorter than one poll interval times out before the
/// first poll is ever issued.
#[tokio::test(start_paused = true)]
async fn deadline_shorter_than_cadence_polls_nothing() {
    let plane = ScriptedControlPlane::new().script("prod-web", vec![ready("v5")]);

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Version(&desired()),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, ReconciliationOutcome::TimedOut { .. }));
    assert_eq!(plane.polls("prod-web"), 0);
}

// =============================================================================
// Ready Goal (pre-check)
// =============================================================================

/// Test: The Ready goal waits through Launching and accepts any version.
#[tokio::test(start_paused = true)]
async fn ready_goal_waits_through_launching() {
    let plane = ScriptedControlPlane::new()
        .script("prod-web", vec![launching(), launching(), ready("v1")]);

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Ready,
        Duration::from_secs(60),
    )
    .await
    .unwrap();

    assert_eq!(outcome, ReconciliationOutcome::Succeeded);
    assert_eq!(plane.polls("prod-web"), 3);
}

/// Test: The Ready goal still rejects statuses outside the expected set.
#[tokio::test(start_paused = true)]
async fn ready_goal_rejects_terminating() {
    let plane = ScriptedControlPlane::new()
        .script("prod-web", vec![status(EnvironmentStatus::Terminating)]);

    let outcome = reconcile(
        &plane,
        &application(),
        &environment(),
        Goal::Ready,
        Duration::from_secs(60),
    )
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        ReconciliationOutcome::UnexpectedStatus { .. }
    ));
}
