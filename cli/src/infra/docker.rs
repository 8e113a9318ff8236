//! Infrastructure implementation of the `ContainerRuntime` port.

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ContainerRuntime, Invocation};
use crate::domain::ExecEnv;

/// Adapter over the `docker` CLI. Builds run from the project root.
pub struct DockerCli<R: CommandRunner> {
    runner: Arc<R>,
    binary: String,
}

impl<R: CommandRunner> DockerCli<R> {
    pub fn new(runner: Arc<R>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<R: CommandRunner> ContainerRuntime for DockerCli<R> {
    async fn build(&self, env: &ExecEnv, tag: &str, context: &str) -> Result<()> {
        self.runner
            .run(env, &Invocation::new(&self.binary, ["build", "-t", tag, context]))
            .await?;
        Ok(())
    }
}
