//! Stash, pop, or list shelved working-tree changes.

use crate::core::ArtError;
use crate::store::Repository;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn stash(action: Option<&str>) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;

    match action {
        None | Some("save") => match repo.stash()? {
            Some(dir_name) => println!(
                "{} saved working tree as {}",
                style("✓").green().bold(),
                style(dir_name).yellow()
            ),
            None => println!("{} nothing to stash", style("!").yellow().bold()),
        },
        Some("pop") => match repo.stash_pop() {
            Ok(()) => println!("{} restored stashed changes", style("✓").green().bold()),
            Err(ArtError::NotFound(reason)) => println!("{} {}", style("!").yellow().bold(), reason),
            Err(e) => return Err(e.into()),
        },
        Some("list") => {
            let entries = repo.stash_list()?;
            if entries.is_empty() {
                println!("{}", style("no stash entries").dim());
            } else {
                for entry in entries {
                    println!("{} {}", style(entry.id).yellow(), entry.date);
                }
            }
        }
        Some(other) => anyhow::bail!("unknown stash subcommand '{other}'"),
    }

    Ok(())
}
