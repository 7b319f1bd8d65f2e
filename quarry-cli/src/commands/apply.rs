//! `quarry apply` — provision everything a manifest declares.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use quarry_core::manifest;
use quarry_provision::{pipeline, ClassifierConfig, RunMode};

use crate::reporter::ConsoleReporter;

/// Arguments for `quarry apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the manifest YAML file.
    pub manifest: PathBuf,

    /// Workspace identifier on the hosting platform.
    #[arg(long, short = 'w')]
    pub workspace: String,

    /// Emit one JSON event per step instead of colored console lines.
    #[arg(long)]
    pub json: bool,

    /// Timestamp gap (milliseconds) under which an ambiguous create response
    /// still counts as a fresh creation.
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub create_grace_ms: i64,
}

impl ApplyArgs {
    pub fn run(self) -> Result<()> {
        let manifest = manifest::load(&self.manifest)
            .with_context(|| format!("invalid manifest '{}'", self.manifest.display()))?;
        let client = super::client_from_env()?;
        let config = ClassifierConfig::with_grace_ms(self.create_grace_ms);

        let mut reporter = ConsoleReporter::new(self.json);
        let report = pipeline::run(
            &client,
            &self.workspace,
            &manifest,
            RunMode::Provision,
            &config,
            &mut reporter,
        );
        reporter.summary(&report);

        // Per-resource failures are data in the report, not process errors.
        Ok(())
    }
}
