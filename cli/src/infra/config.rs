//! Infrastructure implementation of the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::{StackConfig, validate_config};

/// File name looked up in the project root when no path is given.
pub const CONFIG_FILE_NAME: &str = "stackup.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// Use `explicit` if given, otherwise `<root>/stackup.yaml`.
    #[must_use]
    pub fn new(root: &Path, explicit: Option<&Path>) -> Self {
        let path = explicit.map_or_else(|| root.join(CONFIG_FILE_NAME), Path::to_path_buf);
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<StackConfig> {
        if !self.path.exists() {
            return Ok(StackConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let config: StackConfig = if content.trim().is_empty() {
            StackConfig::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", self.path.display()))?
        };
        validate_config(&config).with_context(|| format!("invalid {}", self.path.display()))?;
        Ok(config)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
