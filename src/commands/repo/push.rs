//! Push: verify a remote is configured.
//!
//! The wire protocol that would actually transfer commits to a remote mirror
//! is out of scope; this only confirms a remote handle is set.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn push() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;
    repo.push()?;
    println!("{} pushed to {}", style("✓").green().bold(), repo.remote_url()?);
    Ok(())
}
