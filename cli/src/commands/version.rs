//! Version command

use anyhow::Result;
use clap::Args;

/// Arguments for the version command.
#[derive(Args)]
pub struct VersionArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &VersionArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if args.json {
        let out = serde_json::json!({ "version": version });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("stackup {version}");
    }
    Ok(())
}
