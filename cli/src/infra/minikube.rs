//! Infrastructure implementation of the `ClusterControl` port.
//!
//! `MinikubeCli<R>` routes all minikube CLI calls through a `CommandRunner`.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::{ClusterControl, ClusterStatus, CommandRunner, Invocation};
use crate::domain::ExecEnv;
use crate::domain::config::ClusterConfig;
use crate::domain::environment::parse_exports;

/// Marker `minikube status` prints for a healthy host.
const RUNNING_MARKER: &str = "Running";

/// Adapter over the `minikube` binary for one profile.
pub struct MinikubeCli<R: CommandRunner> {
    runner: Arc<R>,
    binary: String,
    profile: String,
}

impl<R: CommandRunner> MinikubeCli<R> {
    pub fn new(runner: Arc<R>, config: &ClusterConfig) -> Self {
        Self {
            runner,
            binary: config.binary.clone(),
            profile: config.profile.clone(),
        }
    }

    fn invocation(&self, args: &[&str]) -> Invocation {
        Invocation::new(
            &self.binary,
            ["-p", self.profile.as_str()].into_iter().chain(args.iter().copied()),
        )
    }
}

impl<R: CommandRunner> ClusterControl for MinikubeCli<R> {
    async fn status(&self, env: &ExecEnv) -> Result<ClusterStatus> {
        let out = self
            .runner
            .probe(env, &self.invocation(&["status"]))
            .await
            .context("minikube status")?;
        Ok(ClusterStatus {
            running: out.success && out.stdout.contains(RUNNING_MARKER),
            text: out.stdout,
        })
    }

    async fn start(&self, env: &ExecEnv) -> Result<()> {
        self.runner
            .run(env, &self.invocation(&["start"]).inherit_output())
            .await
            .context("minikube start")?;
        Ok(())
    }

    async fn address(&self, env: &ExecEnv) -> Result<String> {
        let out = self
            .runner
            .probe(env, &self.invocation(&["ip"]))
            .await
            .context("minikube ip")?;
        anyhow::ensure!(out.success, "minikube ip exited unsuccessfully");
        Ok(out.stdout)
    }

    async fn runtime_environment(&self, env: &ExecEnv) -> Result<Vec<(String, String)>> {
        let out = self
            .runner
            .run(env, &self.invocation(&["docker-env", "--shell", "bash"]))
            .await
            .context("minikube docker-env")?;
        Ok(parse_exports(&out))
    }
}
