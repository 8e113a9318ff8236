//! `stackup services`: list discovered services.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Logger;

/// Run `stackup services`.
///
/// # Errors
///
/// Returns an error if the project root cannot be listed.
pub fn run(app: &AppContext) -> Result<()> {
    let services = app.services()?;
    if services.is_empty() {
        app.output.warn(&format!(
            "No services found: no subdirectory of {} contains a {}.",
            app.root.display(),
            app.config.runtime.build_descriptor
        ));
        return Ok(());
    }

    let width = services.iter().map(|s| s.name().len()).max().unwrap_or(0);
    for service in &services {
        app.output.line(&format!(
            "  {:<width$}  {}",
            service.name(),
            service.image_tag(&app.config.runtime.image_suffix)
        ));
    }
    Ok(())
}
