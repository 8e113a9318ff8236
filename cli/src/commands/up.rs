//! `stackup up`: bring the whole stack up.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::stack_up::{UpOptions, stack_up};
use crate::domain::AccessPoints;
use crate::output::access;

/// Run `stackup up`.
///
/// # Errors
///
/// Returns an error if the cluster cannot be started, an image build or
/// status query fails, or the background apply fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let services = app.services()?;
    let host_env = app.host_env();

    let report = stack_up(
        &app.cluster(),
        &app.docker(),
        &app.kubectl(),
        app.terraform(),
        app.logger(),
        UpOptions {
            config: &app.config,
            services: &services,
            host_env: &host_env,
            manifests_dir: app.config.infra.manifests_path(&app.root),
        },
    )
    .await?;

    access::print(
        &app.output,
        &AccessPoints::new(
            &report.address,
            &app.config.access,
            &app.config.workloads.binary,
        ),
    );
    Ok(())
}
