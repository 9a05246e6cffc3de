//! Clone a repository handle into a fresh local directory.

use crate::store::Repository;
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

pub fn clone(handle: &str, dest: Option<&str>) -> Result<()> {
    let dest_path = match dest {
        Some(dest) => PathBuf::from(dest),
        None => PathBuf::from(
            handle
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(handle),
        ),
    };

    let repo = Repository::clone_from(handle, &dest_path)?;

    println!(
        "{} cloned '{}' into {}",
        style("✓").green().bold(),
        handle,
        Path::new(&repo.root).display()
    );

    Ok(())
}
