//! Get or set the configured remote handle.

use crate::core::ArtError;
use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn remote(url: Option<&str>) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    match url {
        Some(url) => {
            repo.set_remote(url)?;
            println!("{} remote set to {}", style("✓").green().bold(), style(url).cyan());
        }
        None => match repo.remote_url() {
            Ok(url) => println!("{url}"),
            Err(ArtError::RemoteUnconfigured) => println!("{} no remote configured", style("!").yellow().bold()),
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
