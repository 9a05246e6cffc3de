//! Commit master object (§3): `{ hash, message, timestamp, parent, parts }`.

use crate::core::error::ArtResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub timestamp: u64,
    pub parent: Option<String>,
    pub parts: Vec<String>,
}

impl Commit {
    pub fn load(path: &Path) -> ArtResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| crate::core::error::ArtError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> ArtResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| crate::core::error::ArtError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(self)? + "\n";
        fs::write(path, text).map_err(|e| crate::core::error::ArtError::io(path, e))
    }
}
