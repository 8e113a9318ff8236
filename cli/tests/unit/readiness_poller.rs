//! Readiness poller behaviour against scripted workload listings.

#![allow(clippy::expect_used)]

use std::time::Duration;

use stackup_cli::application::ports::Level;
use stackup_cli::application::services::readiness::{
    NoBackgroundWork, WaitOptions, check_existing_deployments, wait_for_workloads,
};
use stackup_cli::domain::{ExecEnv, PollState, ReadinessPolicy, StackError};

use crate::helpers::{
    FailsAfter, POD_HEADER, RecordingLog, ScriptedWorkloads, UnreachableWorkloads, pod_table,
};

fn opts(max_attempts: u32) -> WaitOptions<'static> {
    WaitOptions {
        kind: "pods",
        ready_marker: "Running",
        policy: ReadinessPolicy {
            max_attempts,
            interval: Duration::from_secs(3),
            progress_every: 5,
        },
    }
}

#[tokio::test(start_paused = true)]
async fn ready_on_first_poll_spends_no_attempts() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Running", "Running"]));
    let log = RecordingLog::default();

    let report = wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(40), &log)
        .await
        .expect("wait");

    assert_eq!(report.state, PollState::AllReady);
    assert_eq!(report.polls, 1);
    assert_eq!(report.attempts, 0);
    assert_eq!(log.count(Level::Success, "All pods are RUNNING"), 1);
}

#[tokio::test(start_paused = true)]
async fn becomes_ready_after_two_waits() {
    let workloads = ScriptedWorkloads::new(vec![
        pod_table(&["Running", "ContainerCreating"]),
        pod_table(&["Running", "Pending"]),
        pod_table(&["Running", "Running"]),
    ]);
    let log = RecordingLog::default();
    let started = tokio::time::Instant::now();

    let report = wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(40), &log)
        .await
        .expect("wait");

    assert_eq!(report.state, PollState::AllReady);
    assert_eq!(report.polls, 3);
    assert_eq!(report.attempts, 2);
    assert_eq!(started.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn header_only_listing_times_out() {
    let workloads = ScriptedWorkloads::always(vec![POD_HEADER.to_string()]);
    let log = RecordingLog::default();

    let report = wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(4), &log)
        .await
        .expect("timeout is not an error");

    assert_eq!(report.state, PollState::TimedOut);
    assert_eq!(workloads.pod_queries(), 4);
    assert_eq!(log.count(Level::Warn, "Timed out waiting for pods"), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_listing_times_out() {
    let workloads = ScriptedWorkloads::always(Vec::new());
    let log = RecordingLog::default();

    let report = wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(2), &log)
        .await
        .expect("timeout is not an error");

    assert_eq!(report.state, PollState::TimedOut);
    assert_eq!(report.polls, 2);
}

#[tokio::test(start_paused = true)]
async fn zero_budget_times_out_without_querying() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Pending"]));
    let log = RecordingLog::default();

    let report = wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(0), &log)
        .await
        .expect("timeout is not an error");

    assert_eq!(report.state, PollState::TimedOut);
    assert_eq!(report.polls, 0);
    assert_eq!(report.attempts, 0);
    assert_eq!(workloads.pod_queries(), 0);
}

#[tokio::test(start_paused = true)]
async fn progress_is_logged_every_fifth_attempt() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Pending"]));
    let log = RecordingLog::default();

    wait_for_workloads(&workloads, &NoBackgroundWork, &ExecEnv::default(), &opts(40), &log)
        .await
        .expect("wait");

    // Attempts 5, 10, ..., 35; the 40th ends the wait instead.
    assert_eq!(log.count(Level::Debug, "Still waiting for pods"), 7);
    assert_eq!(log.count(Level::Debug, "attempt 5/40"), 1);
}

#[tokio::test(start_paused = true)]
async fn failure_before_first_poll_issues_no_query() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Running"]));
    let log = RecordingLog::default();

    let err = wait_for_workloads(&workloads, &FailsAfter::new(0), &ExecEnv::default(), &opts(40), &log)
        .await
        .expect_err("background failure aborts");

    assert!(matches!(
        err.downcast_ref::<StackError>(),
        Some(StackError::BackgroundApplyFailed { .. })
    ));
    assert_eq!(workloads.pod_queries(), 0);
    assert_eq!(
        log.count(Level::Error, "Infrastructure apply failed in background; aborting."),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn failure_flag_is_checked_before_every_query() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Pending"]));
    let log = RecordingLog::default();

    let err = wait_for_workloads(&workloads, &FailsAfter::new(3), &ExecEnv::default(), &opts(40), &log)
        .await
        .expect_err("background failure aborts");

    assert!(err.to_string().contains("applying manifests"));
    assert_eq!(workloads.pod_queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn failure_wins_over_a_healthy_listing() {
    let workloads = ScriptedWorkloads::always(pod_table(&["Running"]));
    let log = RecordingLog::default();

    let result =
        wait_for_workloads(&workloads, &FailsAfter::new(0), &ExecEnv::default(), &opts(1), &log).await;

    assert!(result.is_err());
    assert_eq!(log.count(Level::Success, "RUNNING"), 0);
}

#[tokio::test(start_paused = true)]
async fn status_query_error_is_fatal() {
    let log = RecordingLog::default();

    let err = wait_for_workloads(
        &UnreachableWorkloads,
        &NoBackgroundWork,
        &ExecEnv::default(),
        &opts(40),
        &log,
    )
    .await
    .expect_err("query failure propagates");

    assert!(format!("{err:#}").starts_with("querying pods: "));
}

#[tokio::test]
async fn existing_deployment_is_detected_by_sentinel() {
    let workloads = ScriptedWorkloads::always(Vec::new()).with_deployments(&[
        "NAME                 READY   UP-TO-DATE   AVAILABLE   AGE",
        "backend-deployment   1/1     1            1           3d",
    ]);
    let log = RecordingLog::default();

    let found =
        check_existing_deployments(&workloads, &ExecEnv::default(), "backend-deployment", &log).await;

    assert!(found);
    assert_eq!(log.count(Level::Info, "Existing deployments found."), 1);
    assert_eq!(workloads.pod_queries(), 0, "the check must not use the loud `get`");
}

#[tokio::test]
async fn deployment_check_failure_is_not_fatal() {
    let log = RecordingLog::default();

    let found =
        check_existing_deployments(&UnreachableWorkloads, &ExecEnv::default(), "backend-deployment", &log)
            .await;

    assert!(!found);
    assert_eq!(log.count(Level::Info, "No existing deployments found."), 1);
    assert_eq!(log.count(Level::Error, ""), 0);
}
