//! Initialize a new repository.

use crate::core::ArtError;
use crate::store::{layout, Repository};
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn init(path: &str) -> Result<()> {
    let path = Path::new(path);

    match Repository::init(path) {
        Ok(repo) => {
            println!(
                "{} initialized empty repository in {}",
                style("✓").green().bold(),
                layout::art_dir(&repo.root).display()
            );
            Ok(())
        }
        Err(ArtError::Conflict(reason)) => {
            println!("{} {}", style("!").yellow().bold(), reason);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
