//! stackup - bring up a local Kubernetes stack for development

use clap::Parser;

use stackup_cli::cli::Cli;
use stackup_cli::domain::error::is_reported;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        if !is_reported(&e) {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
