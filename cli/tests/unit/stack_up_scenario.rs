//! End-to-end `up` flow against stub ports.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use stackup_cli::application::ports::{Level, Logger};
use stackup_cli::application::services::apply::ApplyState;
use stackup_cli::application::services::stack_up::{UpOptions, stack_up};
use stackup_cli::domain::{AccessPoints, ExecEnv, PollState, Service, StackConfig, StackError};

use crate::helpers::{
    RecordingLog, RecordingRuntime, ScriptedWorkloads, StubApplier, StubCluster, pod_table,
};

fn services() -> Vec<Service> {
    ["backend", "jenkins", "ui"]
        .into_iter()
        .map(Service::new)
        .collect()
}

fn host_env() -> ExecEnv {
    ExecEnv::from_vars([("PATH", "/usr/bin:/bin"), ("HOME", "/home/dev")])
}

#[tokio::test(start_paused = true)]
async fn up_builds_deploys_and_waits_until_ready() {
    let cluster = StubCluster::running("192.168.49.2");
    let runtime = RecordingRuntime::default();
    let workloads = ScriptedWorkloads::new(vec![
        pod_table(&["Running", "Running", "Running", "ContainerCreating"]),
        pod_table(&["Running", "Running", "Running", "Pending"]),
        pod_table(&["Running", "Running", "Running", "Running"]),
    ]);
    let applier = Arc::new(StubApplier::succeeding(Duration::from_secs(1)));
    let log = Arc::new(RecordingLog::default());
    let dyn_log: Arc<dyn Logger> = log.clone();
    let config = StackConfig::default();
    let services = services();
    let host = host_env();

    let report = stack_up(
        &cluster,
        &runtime,
        &workloads,
        Arc::clone(&applier),
        dyn_log,
        UpOptions {
            config: &config,
            services: &services,
            host_env: &host,
            manifests_dir: PathBuf::from("/work/terraform/local"),
        },
    )
    .await
    .expect("up succeeds");

    assert_eq!(report.readiness.state, PollState::AllReady);
    assert_eq!(report.readiness.polls, 3);
    assert_eq!(report.address, "192.168.49.2");
    assert_eq!(
        report.built,
        vec![
            "backend-service:latest",
            "jenkins-service:latest",
            "ui-service:latest"
        ]
    );
    assert_eq!(cluster.starts.load(Ordering::SeqCst), 0);

    // Every build ran against the runtime bound to the cluster.
    for (_, context, docker_host) in runtime.builds() {
        assert!(context.starts_with("./"));
        assert_eq!(docker_host.as_deref(), Some("tcp://192.168.49.2:2376"));
    }

    // The wait took 6s of virtual time; both 1s steps finished inside it.
    assert_eq!(report.apply, ApplyState::Succeeded);
    assert_eq!(applier.steps(), vec!["init", "apply"]);

    let points = AccessPoints::new(&report.address, &config.access, &config.workloads.binary);
    assert_eq!(points.ingress_url, "http://192.168.49.2:32080/");
    assert!(!points.port_forwards.is_empty());

    let headers = log.headers();
    assert_eq!(headers.first().map(String::as_str), Some("Step 1: Checking Infrastructure"));
    assert_eq!(headers.last().map(String::as_str), Some("Step 6: Health Check"));
}

#[tokio::test(start_paused = true)]
async fn up_starts_a_stopped_cluster() {
    let cluster = StubCluster::stopped("192.168.49.2");
    let workloads = ScriptedWorkloads::always(pod_table(&["Running"]));
    let log = Arc::new(RecordingLog::default());
    let dyn_log: Arc<dyn Logger> = log.clone();
    let config = StackConfig::default();
    let host = host_env();

    stack_up(
        &cluster,
        &RecordingRuntime::default(),
        &workloads,
        Arc::new(StubApplier::succeeding(Duration::ZERO)),
        dyn_log,
        UpOptions {
            config: &config,
            services: &services(),
            host_env: &host,
            manifests_dir: PathBuf::from("/work/terraform/local"),
        },
    )
    .await
    .expect("up succeeds");

    assert_eq!(cluster.starts.load(Ordering::SeqCst), 1);
    assert_eq!(log.count(Level::Warn, "Cluster is NOT running"), 1);
}

#[tokio::test(start_paused = true)]
async fn up_aborts_when_background_apply_fails() {
    let cluster = StubCluster::running("192.168.49.2");
    let workloads = ScriptedWorkloads::always(pod_table(&["Pending"]));
    let applier = Arc::new(StubApplier::failing_init());
    let log = Arc::new(RecordingLog::default());
    let dyn_log: Arc<dyn Logger> = log.clone();
    let config = StackConfig::default();
    let host = host_env();

    let err = stack_up(
        &cluster,
        &RecordingRuntime::default(),
        &workloads,
        Arc::clone(&applier),
        dyn_log,
        UpOptions {
            config: &config,
            services: &services(),
            host_env: &host,
            manifests_dir: PathBuf::from("/work/terraform/local"),
        },
    )
    .await
    .expect_err("background failure aborts up");

    match err.downcast_ref::<StackError>() {
        Some(StackError::BackgroundApplyFailed { reason }) => {
            assert!(reason.contains("initialising infrastructure state"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(applier.steps(), vec!["init"]);
    assert!(workloads.pod_queries() < config.readiness.max_attempts);
    assert_eq!(
        log.count(Level::Error, "Infrastructure apply failed in background; aborting."),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn up_falls_back_to_placeholder_address() {
    let cluster = StubCluster {
        address: None,
        ..StubCluster::running("unused")
    };
    let workloads = ScriptedWorkloads::always(pod_table(&["Running"]));
    let log: Arc<dyn Logger> = Arc::new(RecordingLog::default());
    let config = StackConfig::default();
    let host = host_env();

    let report = stack_up(
        &cluster,
        &RecordingRuntime::default(),
        &workloads,
        Arc::new(StubApplier::succeeding(Duration::from_secs(3600))),
        log,
        UpOptions {
            config: &config,
            services: &services(),
            host_env: &host,
            manifests_dir: PathBuf::from("/work/terraform/local"),
        },
    )
    .await
    .expect("up succeeds");

    assert_eq!(report.address, config.cluster.address_placeholder);
    assert_eq!(report.apply, ApplyState::Pending);
}
