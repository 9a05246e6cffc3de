//! Pull: fetch, then fast-forward or merge into the active branch.
//!
//! The wire protocol that would populate `history/remote/<branch>/` over a
//! network is out of scope; this only confirms a remote handle is set.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn pull() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;
    repo.pull()?;
    println!("{} pulled from {}", style("✓").green().bold(), repo.remote_url()?);
    Ok(())
}
