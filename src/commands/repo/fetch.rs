//! Fetch: verify a remote is configured.
//!
//! The wire protocol that would actually populate `history/remote/<branch>/`
//! over a network is out of scope; this only confirms a remote handle is set.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn fetch() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;
    repo.fetch()?;
    println!("{} fetched from {}", style("✓").green().bold(), repo.remote_url()?);
    Ok(())
}
