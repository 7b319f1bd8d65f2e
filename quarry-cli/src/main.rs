//! Quarry — declarative workspace provisioning CLI.
//!
//! # Usage
//!
//! ```text
//! quarry apply   <manifest.yaml> --workspace <ws> [--json] [--create-grace-ms <ms>]
//! quarry destroy <manifest.yaml> --workspace <ws> [--json]
//! quarry validate <manifest.yaml>
//! ```
//!
//! Credentials come from `BITBUCKET_USERNAME` / `BITBUCKET_APP_PASSWORD`;
//! `QUARRY_API_URL` overrides the API root (test servers).

mod commands;
mod reporter;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{apply::ApplyArgs, destroy::DestroyArgs, validate::ValidateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "quarry",
    version,
    about = "Provision and tear down source-control workspace resources from a manifest",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create every project, repository, and branch the manifest declares.
    Apply(ApplyArgs),

    /// Delete every repository and project the manifest declares (best-effort).
    Destroy(DestroyArgs),

    /// Parse and validate a manifest without touching the platform.
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Apply(args) => args.run(),
        Commands::Destroy(args) => args.run(),
        Commands::Validate(args) => args.run(),
    }
}
