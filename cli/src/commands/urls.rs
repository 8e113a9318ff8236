//! `stackup urls`: print access points.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::bootstrap::resolve_address;
use crate::domain::AccessPoints;
use crate::output::access;

/// Run `stackup urls`. An unreachable cluster yields placeholder URLs.
///
/// # Errors
///
/// Never fails once the context is built; the signature matches the other
/// command handlers.
pub async fn run(app: &AppContext) -> Result<()> {
    let address = resolve_address(
        &app.cluster(),
        &app.host_env(),
        &app.config.cluster.address_placeholder,
        app.output.as_ref(),
    )
    .await;
    let points = AccessPoints::new(&address, &app.config.access, &app.config.workloads.binary);
    access::print(&app.output, &points);
    Ok(())
}
