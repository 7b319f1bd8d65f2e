//! `quarry destroy` — tear down everything a manifest declares.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use quarry_core::manifest;
use quarry_provision::{pipeline, ClassifierConfig, RunMode};

use crate::reporter::ConsoleReporter;

/// Arguments for `quarry destroy`.
#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// Path to the manifest YAML file.
    pub manifest: PathBuf,

    /// Workspace identifier on the hosting platform.
    #[arg(long, short = 'w')]
    pub workspace: String,

    /// Emit one JSON event per step instead of colored console lines.
    #[arg(long)]
    pub json: bool,
}

impl DestroyArgs {
    pub fn run(self) -> Result<()> {
        let manifest = manifest::load(&self.manifest)
            .with_context(|| format!("invalid manifest '{}'", self.manifest.display()))?;
        let client = super::client_from_env()?;

        let mut reporter = ConsoleReporter::new(self.json);
        let report = pipeline::run(
            &client,
            &self.workspace,
            &manifest,
            RunMode::Teardown,
            &ClassifierConfig::default(),
            &mut reporter,
        );
        reporter.summary(&report);

        Ok(())
    }
}
