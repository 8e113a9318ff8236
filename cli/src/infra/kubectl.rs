//! Infrastructure implementation of the `WorkloadQuery` port.

use std::sync::Arc;

use anyhow::{Result, ensure};

use crate::application::ports::{CommandRunner, Invocation, WorkloadQuery};
use crate::domain::ExecEnv;

/// Adapter over `kubectl get`.
pub struct KubectlCli<R: CommandRunner> {
    runner: Arc<R>,
    binary: String,
}

impl<R: CommandRunner> KubectlCli<R> {
    pub fn new(runner: Arc<R>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<R: CommandRunner> KubectlCli<R> {
    fn invocation(&self, kind: &str) -> Invocation {
        Invocation::new(&self.binary, ["get", kind])
    }
}

impl<R: CommandRunner> WorkloadQuery for KubectlCli<R> {
    async fn get(&self, env: &ExecEnv, kind: &str) -> Result<Vec<String>> {
        let out = self.runner.run(env, &self.invocation(kind)).await?;
        Ok(out.lines().map(str::to_owned).collect())
    }

    async fn peek(&self, env: &ExecEnv, kind: &str) -> Result<Vec<String>> {
        let inv = self.invocation(kind);
        let out = self.runner.probe(env, &inv).await?;
        ensure!(out.success, "`{}` exited unsuccessfully", inv.display());
        Ok(out.stdout.lines().map(str::to_owned).collect())
    }
}
