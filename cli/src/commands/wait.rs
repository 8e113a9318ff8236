//! `stackup wait`: readiness wait without deploying.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Logger;
use crate::application::services::readiness::{NoBackgroundWork, WaitOptions, wait_for_workloads};

/// Run `stackup wait`. A timeout is reported but is not an error.
///
/// # Errors
///
/// Returns an error if a status query fails.
pub async fn run(app: &AppContext) -> Result<()> {
    app.output.header("Health Check");
    let workloads = &app.config.workloads;
    wait_for_workloads(
        &app.kubectl(),
        &NoBackgroundWork,
        &app.host_env(),
        &WaitOptions {
            kind: &workloads.kind,
            ready_marker: &workloads.ready_marker,
            policy: app.config.readiness.policy(),
        },
        app.output.as_ref(),
    )
    .await?;
    Ok(())
}
