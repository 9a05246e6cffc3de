//! Show the active branch's commit history.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn log() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    let history = repo.log()?;
    if history.is_empty() {
        println!("{}", style("No commits yet").dim());
        return Ok(());
    }

    for line in history.lines() {
        println!("{}", line);
    }

    Ok(())
}
