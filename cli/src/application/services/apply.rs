//! Background apply coordinator.
//!
//! Runs `init` + `apply` of the infrastructure manifests in a detached task
//! and publishes the result through a single-slot watch channel. The main
//! flow never joins the task; it only reads the slot.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;

use crate::application::ports::{BackgroundOutcome, InfraApplier, Logger};
use crate::domain::ExecEnv;

/// Content of the outcome slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyState {
    /// The worker has not finished (or has not started).
    Pending,
    Succeeded,
    /// The worker failed; holds the error chain.
    Failed(String),
}

impl ApplyState {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Handle on a running background apply.
///
/// Cloning the handle shares the same outcome slot.
#[derive(Debug, Clone)]
pub struct BackgroundApply {
    outcome: watch::Receiver<ApplyState>,
}

impl BackgroundApply {
    /// Launch the worker and return immediately.
    ///
    /// Must be called from within a tokio runtime. The worker cannot be
    /// cancelled; it ends on its own or when the process exits.
    pub fn start<A>(applier: Arc<A>, env: ExecEnv, dir: PathBuf, log: Arc<dyn Logger>) -> Self
    where
        A: InfraApplier + 'static,
    {
        let (tx, rx) = watch::channel(ApplyState::Pending);
        tokio::spawn(async move {
            // The steps run in their own task so a panic is caught as a
            // JoinError instead of being lost with the worker.
            let steps = tokio::spawn(run_steps(applier, env, dir));
            let state = match steps.await {
                Ok(Ok(())) => {
                    log.success("Infrastructure apply completed for local manifests.");
                    ApplyState::Succeeded
                }
                Ok(Err(e)) => ApplyState::Failed(format!("{e:#}")),
                Err(e) => ApplyState::Failed(format!("apply worker aborted: {e}")),
            };
            if let ApplyState::Failed(reason) = &state {
                log.debug(&format!("Background apply failed: {reason}"));
            }
            tx.send_replace(state);
        });
        Self { outcome: rx }
    }

    /// Current content of the outcome slot.
    #[must_use]
    pub fn state(&self) -> ApplyState {
        self.outcome.borrow().clone()
    }

    /// Wait until the worker has published its result.
    pub async fn settled(&self) -> ApplyState {
        let mut rx = self.outcome.clone();
        if let Ok(state) = rx.wait_for(ApplyState::is_settled).await {
            return state.clone();
        }
        self.state()
    }
}

impl BackgroundOutcome for BackgroundApply {
    fn has_failed(&self) -> bool {
        matches!(*self.outcome.borrow(), ApplyState::Failed(_))
    }

    fn failure(&self) -> Option<String> {
        match &*self.outcome.borrow() {
            ApplyState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

async fn run_steps<A: InfraApplier>(applier: Arc<A>, env: ExecEnv, dir: PathBuf) -> Result<()> {
    applier
        .init(&env, &dir)
        .await
        .context("initialising infrastructure state")?;
    applier
        .apply(&env, &dir)
        .await
        .context("applying manifests")
}
