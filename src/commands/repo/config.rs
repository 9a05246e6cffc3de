//! Read or write settings.
//!
//! Two distinct backing stores exist, disambiguated by key prefix:
//! - `repo.*` keys live in `head.configuration`, the opaque core-owned bag
//!   written to `.art/art.json` inside the active repository.
//! - every other key (`user.name`, `user.email`, `core.default_branch`,
//!   `core.verbose`) lives in the local configuration file, read with
//!   repository-local override over user-global default.

use crate::config::{global_config_path, Config};
use crate::store::{layout, Repository};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const REPO_PREFIX: &str = "repo.";

pub fn config(key: Option<&str>, value: Option<&str>, global: bool, list: bool, unset: bool) -> Result<()> {
    if let Some(key) = key {
        if let Some(repo_key) = key.strip_prefix(REPO_PREFIX) {
            return repo_config(repo_key, value, unset);
        }
    }

    let local_config_path = |repo: &Repository| layout::art_dir(&repo.root).join("config.toml");

    let config_path = if global {
        global_config_path()
    } else {
        match Repository::open(Path::new(".")) {
            Ok(repo) => local_config_path(&repo),
            Err(_) => global_config_path(),
        }
    };

    let mut config = Config::load(&config_path)?;

    if list || (key.is_none() && value.is_none()) {
        let items = config.list();
        if items.is_empty() {
            println!("{}", style("no configuration set").dim());
        } else {
            for (k, v) in items {
                println!("{}={}", style(&k).cyan(), v);
            }
        }
        return Ok(());
    }

    let key = key.context("key required")?;

    match (value, unset) {
        (Some(value), false) => {
            config.set(key, value)?;
            config.save(&config_path)?;
            println!("{} set {}={}", style("✓").green().bold(), style(key).cyan(), value);
        }
        (None, true) => {
            if config.unset(key)? {
                config.save(&config_path)?;
                println!("{} unset {}", style("✓").green().bold(), style(key).cyan());
            } else {
                println!("{} key '{}' was not set", style("!").yellow().bold(), key);
            }
        }
        (None, false) => match config.get(key) {
            Some(value) => println!("{value}"),
            None => println!("{} key '{}' not found", style("!").yellow().bold(), key),
        },
        (Some(_), true) => anyhow::bail!("cannot both set and unset a value"),
    }

    Ok(())
}

fn repo_config(key: &str, value: Option<&str>, unset: bool) -> Result<()> {
    let repo = Repository::open(Path::new("."))
        .context("not a repository (or any parent directory)")?;
    let mut head = repo.head()?;

    if unset {
        if head.configuration.remove(key).is_some() {
            repo.save_head(&head)?;
            println!("{} unset repo.{}", style("✓").green().bold(), key);
        } else {
            println!("{} key 'repo.{}' was not set", style("!").yellow().bold(), key);
        }
        return Ok(());
    }

    match value {
        Some(value) => {
            head.configuration.insert(key.to_string(), value.to_string());
            repo.save_head(&head)?;
            println!("{} set repo.{}={}", style("✓").green().bold(), key, value);
        }
        None => match head.configuration.get(key) {
            Some(value) => println!("{value}"),
            None => println!("{} key 'repo.{}' not found", style("!").yellow().bold(), key),
        },
    }

    Ok(())
}
