//! Infrastructure implementation of the `ServiceCatalog` port.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::ServiceCatalog;
use crate::domain::Service;
use crate::domain::service::select_services;

/// Discovers services by listing the project root.
pub struct LocalServiceCatalog;

impl ServiceCatalog for LocalServiceCatalog {
    fn discover(&self, root: &Path, descriptor: &str) -> Result<Vec<Service>> {
        let entries = std::fs::read_dir(root)
            .with_context(|| format!("cannot list {}", root.display()))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("cannot list {}", root.display()))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            found.push((name.to_string(), path.join(descriptor).is_file()));
        }
        Ok(select_services(found))
    }
}
