//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Bring up a local Kubernetes stack for development
#[derive(Parser)]
#[command(
    name = "stackup",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Project root containing the services and manifests
    #[arg(long, global = true, env = "STACKUP_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Configuration file [default: <root>/stackup.yaml]
    #[arg(long, global = true, env = "STACKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug output, including every executed command
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the cluster, build images, deploy, and wait for readiness
    Up,

    /// Wait for workloads to become ready
    Wait,

    /// Show access points
    Urls,

    /// List discovered services and their image tags
    Services,

    /// Show version
    Version(commands::version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            root,
            config,
            verbose,
            quiet,
            no_color,
            command,
        } = self;

        if let Command::Version(args) = &command {
            return commands::version::run(args);
        }

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                verbose,
            },
            root,
            config,
        })?;

        match command {
            Command::Up => commands::up::run(&app).await,
            Command::Wait => commands::wait::run(&app).await,
            Command::Urls => commands::urls::run(&app).await,
            Command::Services => commands::services::run(&app),
            Command::Version(_) => Ok(()),
        }
    }
}
