//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::domain::{CommandError, ExecEnv, Service, StackConfig};

// ── Value Types ───────────────────────────────────────────────────────────────

/// One external command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory override. `None` means the project root.
    pub cwd: Option<PathBuf>,
    /// Capture stdout/stderr. When `false` both are inherited from the
    /// terminal and the command yields an empty string.
    pub capture: bool,
}

impl Invocation {
    /// A captured invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            capture: true,
        }
    }

    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Stream output to the terminal instead of capturing it.
    #[must_use]
    pub fn inherit_output(mut self) -> Self {
        self.capture = false;
        self
    }

    /// The command line as shown in logs.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a best-effort command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    pub success: bool,
    /// Trimmed standard output.
    pub stdout: String,
}

/// Observed cluster status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStatus {
    pub running: bool,
    /// Raw status output, shown at debug level when the cluster is down.
    pub text: String,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Futures are `Send` so that commands can run inside a spawned task.
pub trait CommandRunner: Send + Sync {
    /// Run a command that must succeed.
    ///
    /// Logs the command at debug level before running it. On failure, logs
    /// the command and any captured stderr, then returns the error; the
    /// caller decides whether that ends the process.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` on spawn failure, non-zero exit, or timeout.
    fn run(
        &self,
        env: &ExecEnv,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<String, CommandError>> + Send;

    /// Run a best-effort command. A non-zero exit is reported in the
    /// returned `ProbeOutput`, not as an error, and nothing is logged.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` only if the process cannot be spawned or
    /// exceeds its timeout.
    fn probe(
        &self,
        env: &ExecEnv,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<ProbeOutput, CommandError>> + Send;
}

// ── Collaborator Ports ────────────────────────────────────────────────────────

/// Cluster control CLI.
#[allow(async_fn_in_trait)]
pub trait ClusterControl {
    /// Query cluster status. Callers treat errors as "not running".
    async fn status(&self, env: &ExecEnv) -> Result<ClusterStatus>;
    /// Start the cluster, blocking until the start command returns.
    async fn start(&self, env: &ExecEnv) -> Result<()>;
    /// Externally reachable address of the cluster.
    async fn address(&self, env: &ExecEnv) -> Result<String>;
    /// Variables that point the container runtime client at the cluster.
    async fn runtime_environment(&self, env: &ExecEnv) -> Result<Vec<(String, String)>>;
}

/// Container runtime CLI.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// Build an image tagged `tag` from `context` (relative to the project root).
    async fn build(&self, env: &ExecEnv, tag: &str, context: &str) -> Result<()>;
}

/// Orchestration query CLI.
#[allow(async_fn_in_trait)]
pub trait WorkloadQuery {
    /// List resources of `kind`. The first line is a header.
    async fn get(&self, env: &ExecEnv, kind: &str) -> Result<Vec<String>>;

    /// Best-effort `get`: a failing listing is returned as an error without
    /// being reported as a failed command.
    async fn peek(&self, env: &ExecEnv, kind: &str) -> Result<Vec<String>>;
}

/// Infrastructure-as-code CLI. Runs inside the background apply worker, so
/// its futures must be `Send`.
pub trait InfraApplier: Send + Sync {
    /// Initialise infrastructure state in `dir`.
    fn init(&self, env: &ExecEnv, dir: &Path) -> impl Future<Output = Result<()>> + Send;
    /// Apply the manifests in `dir`.
    fn apply(&self, env: &ExecEnv, dir: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Service discovery on the local filesystem.
pub trait ServiceCatalog {
    /// Subdirectories of `root` that contain `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be listed.
    fn discover(&self, root: &Path, descriptor: &str) -> Result<Vec<Service>>;
}

/// Configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or validated.
    fn load(&self) -> Result<StackConfig>;
    /// Location of the configuration file.
    fn path(&self) -> &Path;
}

// ── Background Outcome Port ───────────────────────────────────────────────────

/// Read side of the background apply outcome slot.
pub trait BackgroundOutcome {
    /// Non-blocking. Once `true`, stays `true`.
    fn has_failed(&self) -> bool;
    /// Failure description, if the background work failed.
    fn failure(&self) -> Option<String>;
}

// ── Logging Port ──────────────────────────────────────────────────────────────

/// Console log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Header,
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

/// Abstracts the console logger so services can emit leveled messages
/// without depending on the Presentation layer.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn header(&self, message: &str) {
        self.log(Level::Header, message);
    }
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }
    fn success(&self, message: &str) {
        self.log(Level::Success, message);
    }
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }
    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}
