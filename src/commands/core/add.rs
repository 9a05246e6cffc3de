//! Add a path to the staging area.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn add(path: &str) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    let outcome = repo.add(Path::new(path))?;

    if outcome.added > 0 {
        println!(
            "{} staged {} change(s) in '{}'",
            style("+").green().bold(),
            outcome.added,
            path
        );
    } else {
        println!("{} nothing new to stage in '{}'", style("!").yellow().bold(), path);
    }

    Ok(())
}
