//! Merge another branch into the active branch.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn merge(branch: &str) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    let outcome = repo.merge(branch)?;

    if outcome.conflicts.is_empty() {
        println!(
            "{} merged '{}', staged for commit",
            style("✓").green().bold(),
            style(branch).cyan()
        );
    } else {
        println!(
            "{} merge produced {} conflict(s):",
            style("!").red().bold(),
            outcome.conflicts.len()
        );
        for path in &outcome.conflicts {
            println!("  {}", style(path).red());
        }
        println!("resolve the markers, then `art add` and `art commit`.");
    }

    Ok(())
}
