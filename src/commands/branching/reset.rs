//! Move the active branch's head (and reset the stage/tree to match).

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn reset(hash: Option<&str>) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    repo.reset(hash)?;

    match hash {
        Some(hash) => println!(
            "{} head is now at {}",
            style("->").green().bold(),
            style(&hash[..8.min(hash.len())]).yellow()
        ),
        None => println!("{} stage cleared", style("->").green().bold()),
    }

    Ok(())
}
