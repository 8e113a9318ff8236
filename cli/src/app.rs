//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the console, the loaded configuration, the project
//! root, and the shared command runner, and builds the CLI adapters that
//! command handlers hand to application services.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::{ConfigStore, Logger, ServiceCatalog};
use crate::domain::{ExecEnv, Service, StackConfig, StackError};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::docker::DockerCli;
use crate::infra::fs::LocalServiceCatalog;
use crate::infra::kubectl::KubectlCli;
use crate::infra::minikube::MinikubeCli;
use crate::infra::terraform::TerraformCli;
use crate::output::OutputContext;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Show debug lines.
    pub verbose: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Project root holding the services and manifests.
    pub root: PathBuf,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context, shared with the command runner.
    pub output: Arc<OutputContext>,
    /// Loaded configuration.
    pub config: StackConfig,
    /// Canonical project root.
    pub root: PathBuf,
    /// Process runner shared by every adapter.
    pub runner: Arc<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the project root does not exist or the
    /// configuration file cannot be loaded.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let output = Arc::new(OutputContext::new(
            flags.output.no_color,
            flags.output.quiet,
            flags.output.verbose,
        ));

        let root = flags
            .root
            .canonicalize()
            .map_err(|_| StackError::RootNotFound(flags.root.display().to_string()))?;

        let store = YamlConfigStore::new(&root, flags.config.as_deref());
        let config = store.load()?;
        output.debug(&format!("Configuration: {}", store.path().display()));

        let log: Arc<dyn Logger> = output.clone();
        let runner = Arc::new(TokioCommandRunner::new(
            root.clone(),
            config.commands.timeout(),
            log,
        ));

        Ok(Self {
            output,
            config,
            root,
            runner,
        })
    }

    /// The console as a shareable logger.
    #[must_use]
    pub fn logger(&self) -> Arc<dyn Logger> {
        self.output.clone()
    }

    /// Environment seeded from the host process.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn host_env(&self) -> ExecEnv {
        ExecEnv::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Services discovered under the project root.
    ///
    /// # Errors
    ///
    /// Returns an error if the project root cannot be listed.
    pub fn services(&self) -> Result<Vec<Service>> {
        let services = LocalServiceCatalog
            .discover(&self.root, &self.config.runtime.build_descriptor)
            .context("discovering services")?;
        self.output.debug(&format!(
            "Discovered {} service(s): {}",
            services.len(),
            services
                .iter()
                .map(Service::name)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        Ok(services)
    }

    #[must_use]
    pub fn cluster(&self) -> MinikubeCli<TokioCommandRunner> {
        MinikubeCli::new(Arc::clone(&self.runner), &self.config.cluster)
    }

    #[must_use]
    pub fn docker(&self) -> DockerCli<TokioCommandRunner> {
        DockerCli::new(Arc::clone(&self.runner), &self.config.runtime.binary)
    }

    #[must_use]
    pub fn kubectl(&self) -> KubectlCli<TokioCommandRunner> {
        KubectlCli::new(Arc::clone(&self.runner), &self.config.workloads.binary)
    }

    #[must_use]
    pub fn terraform(&self) -> Arc<TerraformCli<TokioCommandRunner>> {
        Arc::new(TerraformCli::new(
            Arc::clone(&self.runner),
            &self.config.infra.binary,
        ))
    }
}
