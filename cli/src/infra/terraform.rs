//! Infrastructure implementation of the `InfraApplier` port.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::{CommandRunner, InfraApplier, Invocation};
use crate::domain::ExecEnv;

/// Adapter over `terraform`, run inside the manifest directory.
pub struct TerraformCli<R: CommandRunner> {
    runner: Arc<R>,
    binary: String,
}

impl<R: CommandRunner> TerraformCli<R> {
    pub fn new(runner: Arc<R>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<R: CommandRunner> InfraApplier for TerraformCli<R> {
    async fn init(&self, env: &ExecEnv, dir: &Path) -> Result<()> {
        self.runner
            .run(env, &Invocation::new(&self.binary, ["init"]).in_dir(dir))
            .await?;
        Ok(())
    }

    async fn apply(&self, env: &ExecEnv, dir: &Path) -> Result<()> {
        self.runner
            .run(
                env,
                &Invocation::new(&self.binary, ["apply", "-auto-approve"]).in_dir(dir),
            )
            .await?;
        Ok(())
    }
}
