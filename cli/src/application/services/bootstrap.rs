//! Cluster bootstrap and runtime environment binding.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{ClusterControl, Logger};
use crate::domain::ExecEnv;
use crate::domain::environment::runtime_overrides;

/// Make sure the local cluster is up.
///
/// The status probe is best-effort: any error counts as "not running". Only
/// a failing start command is an error.
///
/// # Errors
///
/// Returns an error if the cluster has to be started and the start fails.
pub async fn ensure_running(
    cluster: &impl ClusterControl,
    env: &ExecEnv,
    log: &impl Logger,
) -> Result<()> {
    match cluster.status(env).await {
        Ok(status) if status.running => {
            log.success("Cluster is already running.");
            return Ok(());
        }
        Ok(status) => log.debug(&format!("Cluster status: {}", status.text.trim())),
        Err(e) => log.debug(&format!("Cluster status probe failed: {e:#}")),
    }

    log.warn("Cluster is NOT running. Starting it now (this may take a while)...");
    cluster.start(env).await.context("starting cluster")?;
    log.success("Cluster started successfully.");
    Ok(())
}

/// Resolve the cluster address, or `placeholder` if it cannot be resolved.
pub async fn resolve_address(
    cluster: &impl ClusterControl,
    env: &ExecEnv,
    placeholder: &str,
    log: &impl Logger,
) -> String {
    match cluster.address(env).await {
        Ok(address) if !address.is_empty() => {
            log.info(&format!("Cluster IP: {address}"));
            address
        }
        Ok(_) => {
            log.error("Failed to get cluster IP: empty response");
            placeholder.to_string()
        }
        Err(e) => {
            log.error(&format!("Failed to get cluster IP: {e:#}"));
            placeholder.to_string()
        }
    }
}

/// Return `host` rebound so container runtime commands target the cluster.
///
/// On failure the host environment is returned unchanged.
pub async fn bind_runtime_environment(
    cluster: &impl ClusterControl,
    host: &ExecEnv,
    log: &impl Logger,
) -> ExecEnv {
    match cluster.runtime_environment(host).await {
        Ok(exports) => {
            let bound = host.with_overrides(runtime_overrides(exports));
            log.info(&format!(
                "Pointing Docker to cluster: {}",
                bound.get("DOCKER_HOST").unwrap_or("not set")
            ));
            bound
        }
        Err(e) => {
            log.error(&format!("Failed to configure Docker environment: {e:#}"));
            host.clone()
        }
    }
}
