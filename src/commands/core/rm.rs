//! Remove a tracked path from the working tree and stage the deletion.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn rm(path: &str) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;
    repo.rm(path)?;
    println!("{} removed '{}'", style("✓").green().bold(), path);
    Ok(())
}
