//! Workload readiness polling.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{BackgroundOutcome, Logger, WorkloadQuery};
use crate::domain::{ExecEnv, PollState, ReadinessPolicy, RetryBudget, StackError, WorkloadSnapshot};

/// Terminal, non-fatal result of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessReport {
    /// `AllReady` or `TimedOut`.
    pub state: PollState,
    /// Status queries issued.
    pub polls: u32,
    /// Retry budget spent.
    pub attempts: u32,
}

/// Outcome for waits that have no background work attached.
pub struct NoBackgroundWork;

impl BackgroundOutcome for NoBackgroundWork {
    fn has_failed(&self) -> bool {
        false
    }
    fn failure(&self) -> Option<String> {
        None
    }
}

/// Options for [`wait_for_workloads`].
pub struct WaitOptions<'a> {
    pub kind: &'a str,
    pub ready_marker: &'a str,
    pub policy: ReadinessPolicy,
}

/// Poll workload status until everything is ready, the background work
/// fails, or the retry budget runs out.
///
/// The background outcome is checked before every status query, so a
/// failure aborts the wait even if the workloads would report healthy. An
/// exhausted budget ends the wait without querying.
///
/// # Errors
///
/// Returns `StackError::BackgroundApplyFailed` when the wait ends in
/// `PollState::AbortedByBackgroundFailure`, or the query error if a status
/// query fails.
pub async fn wait_for_workloads(
    query: &impl WorkloadQuery,
    background: &impl BackgroundOutcome,
    env: &ExecEnv,
    opts: &WaitOptions<'_>,
    log: &impl Logger,
) -> Result<ReadinessReport> {
    log.info(&format!("Waiting for {} to be ready...", opts.kind));

    let mut budget = RetryBudget::new(opts.policy.max_attempts);
    let mut polls = 0;
    let mut last: Option<WorkloadSnapshot> = None;

    let state = loop {
        let state = if background.has_failed() {
            PollState::AbortedByBackgroundFailure
        } else if budget.is_exhausted() {
            PollState::TimedOut
        } else {
            let lines = query
                .get(env, opts.kind)
                .await
                .with_context(|| format!("querying {}", opts.kind))?;
            polls += 1;
            let snapshot = WorkloadSnapshot::new(lines, opts.ready_marker);
            let state = budget.evaluate(&snapshot);
            last = Some(snapshot);
            state
        };

        if state.is_terminal() {
            break state;
        }

        if budget.attempts().checked_rem(opts.policy.progress_every) == Some(0) {
            log.debug(&format!(
                "Still waiting for {} ({} not ready, attempt {}/{})...",
                opts.kind,
                last.as_ref().map_or(0, WorkloadSnapshot::not_ready),
                budget.attempts(),
                budget.max()
            ));
        }
        tokio::time::sleep(opts.policy.interval).await;
    };

    match state {
        PollState::AbortedByBackgroundFailure => {
            log.error("Infrastructure apply failed in background; aborting.");
            return Err(StackError::BackgroundApplyFailed {
                reason: background
                    .failure()
                    .unwrap_or_else(|| "unknown error".to_string()),
            }
            .into());
        }
        PollState::AllReady => log.success(&format!(
            "All {} are RUNNING ({} listed)!",
            opts.kind,
            last.as_ref().map_or(0, WorkloadSnapshot::workloads)
        )),
        // The loop only breaks on terminal states.
        PollState::TimedOut | PollState::Waiting => log.warn(&format!(
            "Timed out waiting for {kind}. They might still be starting. Check 'kubectl get {kind}'.",
            kind = opts.kind
        )),
    }

    Ok(ReadinessReport {
        state,
        polls,
        attempts: budget.attempts(),
    })
}

/// Informational check for a previous deployment. Never fails.
pub async fn check_existing_deployments(
    query: &impl WorkloadQuery,
    env: &ExecEnv,
    sentinel: &str,
    log: &impl Logger,
) -> bool {
    match query.peek(env, "deployments").await {
        Ok(lines) if lines.iter().any(|l| l.contains(sentinel)) => {
            log.info("Existing deployments found.");
            true
        }
        Ok(_) => {
            log.info("No existing deployments found.");
            false
        }
        Err(e) => {
            log.debug(&format!("Deployment check failed: {e:#}"));
            log.info("No existing deployments found.");
            false
        }
    }
}
