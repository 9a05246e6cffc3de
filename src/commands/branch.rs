//! List, create, or delete branches.

use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn branch(name: Option<&str>, delete: bool) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    match (name, delete) {
        (Some(name), true) => {
            repo.delete_branch(name)?;
            println!("{} deleted branch '{}'", style("✓").green().bold(), style(name).cyan());
        }
        (Some(name), false) => {
            repo.create_branch(name)?;
            println!("{} created branch '{}'", style("✓").green().bold(), style(name).cyan());
        }
        (None, _) => {
            let head = repo.head()?;
            for candidate in repo.list_branches()? {
                if candidate == head.active.branch {
                    println!("{} {}", style("*").green().bold(), style(&candidate).green().bold());
                } else {
                    println!("  {candidate}");
                }
            }
        }
    }

    Ok(())
}
