//! Image builds for discovered services.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{ContainerRuntime, Logger};
use crate::domain::{ExecEnv, Service};

/// Build one image per service, in order. Stops at the first failure.
///
/// Returns the tags that were built.
///
/// # Errors
///
/// Returns an error as soon as one build fails; later services are skipped.
pub async fn build_images(
    runtime: &impl ContainerRuntime,
    env: &ExecEnv,
    services: &[Service],
    image_suffix: &str,
    log: &impl Logger,
) -> Result<Vec<String>> {
    if services.is_empty() {
        log.warn("No services found; nothing to build.");
        return Ok(Vec::new());
    }

    let mut built = Vec::with_capacity(services.len());
    for service in services {
        let tag = service.image_tag(image_suffix);
        log.info(&format!("Building image for: {}...", service.name()));
        runtime
            .build(env, &tag, &service.build_context())
            .await
            .with_context(|| format!("building {tag}"))?;
        log.success(&format!("Built {tag}"));
        built.push(tag);
    }
    log.success("All images built successfully.");
    Ok(built)
}
