//! Switch the working tree to another branch.

use crate::core::ArtError;
use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn checkout(target: &str, force: bool) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    match repo.checkout(target, force) {
        Ok(outcome) => {
            println!(
                "{} switched to branch '{}'",
                style("✓").green().bold(),
                style(outcome.branch).cyan()
            );
            Ok(())
        }
        Err(ArtError::Conflict(reason)) => {
            anyhow::bail!("{reason} (use --force to discard local changes)")
        }
        Err(e) => Err(e.into()),
    }
}
