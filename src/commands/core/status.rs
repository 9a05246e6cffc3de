//! Show the working tree status.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn status() -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    let report = repo.status()?;

    println!("On branch {}", style(&report.active_branch).cyan().bold());
    match &report.last_commit {
        Some(hash) => println!("Last commit: {}", style(&hash[..8.min(hash.len())]).yellow()),
        None => println!("{}", style("No commits yet").dim()),
    }
    println!();

    if !report.staged.is_empty() {
        println!("Changes to be committed:");
        for path in &report.staged {
            println!("        {}", style(path).green());
        }
        println!();
    }

    if !report.modified.is_empty() {
        println!("Changes not staged for commit:");
        println!("  (use \"art add <path>...\" to update what will be committed)");
        for path in &report.modified {
            println!("        {}", style(path).red());
        }
        println!();
    }

    if !report.untracked.is_empty() {
        println!("Untracked files:");
        for path in &report.untracked {
            println!("        {}", style(path).red());
        }
        println!();
    }

    if report.staged.is_empty() && report.modified.is_empty() && report.untracked.is_empty() {
        println!("nothing to commit, working tree clean");
    }

    Ok(())
}
