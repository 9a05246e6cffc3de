//! Show differences between the working tree and the active branch head.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn diff() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    let report = repo.diff()?;

    if report.file_diffs.is_empty() {
        println!("{}", style("No differences").dim());
        return Ok(());
    }

    for file_diff in &report.file_diffs {
        println!("{} {}", style("diff --art").cyan(), style(&file_diff.file).bold());
        if !file_diff.deleted.is_empty() {
            println!("{}{}", style("-").red(), style(&file_diff.deleted).red());
        }
        if !file_diff.added.is_empty() {
            println!("{}{}", style("+").green(), style(&file_diff.added).green());
        }
    }

    Ok(())
}
