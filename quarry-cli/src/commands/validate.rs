//! `quarry validate` — check a manifest without touching the platform.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use quarry_core::manifest;

/// Arguments for `quarry validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the manifest YAML file.
    pub manifest: PathBuf,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let manifest = manifest::load(&self.manifest)
            .with_context(|| format!("invalid manifest '{}'", self.manifest.display()))?;

        let repos: usize = manifest.projects.iter().map(|p| p.repositories.len()).sum();
        let branches: usize = manifest
            .projects
            .iter()
            .flat_map(|p| &p.repositories)
            .map(|r| r.branches.len())
            .sum();

        println!(
            "{} {} — {} project(s), {} repository(ies), {} branch(es)",
            "✓".green(),
            self.manifest.display(),
            manifest.projects.len(),
            repos,
            branches
        );
        for project in &manifest.projects {
            println!("  {} ({})", project.key, project.name);
            for repo in &project.repositories {
                let visibility = if repo.is_private { "private" } else { "public" };
                let branch_list: Vec<&str> =
                    repo.branches.iter().map(|b| b.0.as_str()).collect();
                println!("    {} [{visibility}] {}", repo.slug, branch_list.join(", "));
            }
        }
        Ok(())
    }
}
