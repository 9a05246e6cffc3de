//! Create a commit from staged changes.

use crate::core::ArtError;
use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn commit(message: &str) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    match repo.commit(message) {
        Ok(commit) => {
            println!(
                "{} [{}] {}",
                style("✓").green().bold(),
                style(&commit.hash[..8.min(commit.hash.len())]).yellow(),
                message
            );
            Ok(())
        }
        Err(ArtError::InvalidArgument(reason)) => {
            println!("{} {}", style("!").yellow().bold(), reason);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
