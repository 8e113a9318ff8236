//! Application service: stack-up use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::{
    ClusterControl, ContainerRuntime, InfraApplier, Logger, WorkloadQuery,
};
use crate::application::services::apply::{ApplyState, BackgroundApply};
use crate::application::services::bootstrap::{
    bind_runtime_environment, ensure_running, resolve_address,
};
use crate::application::services::images::build_images;
use crate::application::services::readiness::{
    ReadinessReport, WaitOptions, check_existing_deployments, wait_for_workloads,
};
use crate::domain::{ExecEnv, Service, StackConfig};

/// Inputs of [`stack_up`] that are not ports.
pub struct UpOptions<'a> {
    pub config: &'a StackConfig,
    pub services: &'a [Service],
    /// Environment seeded from the host, before binding.
    pub host_env: &'a ExecEnv,
    /// Absolute manifest directory.
    pub manifests_dir: PathBuf,
}

/// What a completed `up` produced.
#[derive(Debug)]
pub struct UpReport {
    /// Cluster address, or the configured placeholder.
    pub address: String,
    pub built: Vec<String>,
    pub existing_deployments: bool,
    pub readiness: ReadinessReport,
    /// Background apply state when the wait ended.
    pub apply: ApplyState,
}

/// Bring the stack up: cluster, runtime binding, images, background apply,
/// readiness wait.
///
/// # Errors
///
/// Returns an error if the cluster cannot be started, an image build fails,
/// a status query fails, or the background apply fails before the workloads
/// are ready. A readiness timeout is not an error.
pub async fn stack_up<A>(
    cluster: &impl ClusterControl,
    runtime: &impl ContainerRuntime,
    workloads: &impl WorkloadQuery,
    applier: Arc<A>,
    log: Arc<dyn Logger>,
    opts: UpOptions<'_>,
) -> Result<UpReport>
where
    A: InfraApplier + 'static,
{
    let UpOptions {
        config,
        services,
        host_env,
        manifests_dir,
    } = opts;

    log.header("Step 1: Checking Infrastructure");
    ensure_running(cluster, host_env, &log).await?;
    let address = resolve_address(
        cluster,
        host_env,
        &config.cluster.address_placeholder,
        &log,
    )
    .await;

    log.header("Step 2: Configuring Docker Environment");
    let env = bind_runtime_environment(cluster, host_env, &log).await;

    log.header("Step 3: Checking Existing Deployments");
    let existing_deployments = check_existing_deployments(
        workloads,
        &env,
        &config.workloads.deployment_sentinel,
        &log,
    )
    .await;
    log.info("Re-building and re-deploying on every run.");

    log.header("Step 4: Building Service Images");
    let built = build_images(runtime, &env, services, &config.runtime.image_suffix, &log).await?;

    log.header("Step 5: Deploying Manifests");
    let apply = BackgroundApply::start(applier, env.clone(), manifests_dir, Arc::clone(&log));
    log.info("Infrastructure apply started in background; waiting for resources to become ready...");

    log.header("Step 6: Health Check");
    let readiness = wait_for_workloads(
        workloads,
        &apply,
        &env,
        &WaitOptions {
            kind: &config.workloads.kind,
            ready_marker: &config.workloads.ready_marker,
            policy: config.readiness.policy(),
        },
        &log,
    )
    .await?;

    let apply = apply.state();
    if apply == ApplyState::Pending {
        log.info("Infrastructure apply is still running in background.");
    }

    Ok(UpReport {
        address,
        built,
        existing_deployments,
        readiness,
        apply,
    })
}
