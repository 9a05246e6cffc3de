//! Branch manifest (§3): `{ commits: [hash...] }`, ordered oldest→newest.

use crate::core::error::ArtResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BranchManifest {
    #[serde(default)]
    pub commits: Vec<String>,
}

impl BranchManifest {
    pub fn load(path: &Path) -> ArtResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
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

    pub fn last(&self) -> Option<&String> {
        self.commits.last()
    }
}
