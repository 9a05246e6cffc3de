//! Head state (§3): `.art/art.json`.

use crate::core::error::{ArtError, ArtResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Active {
    pub branch: String,
    pub parent: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Head {
    pub active: Active,
    #[serde(default)]
    pub remote: String,
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
}

pub const DEFAULT_BRANCH: &str = "main";

impl Head {
    pub fn new_default() -> Self {
        Self {
            active: Active {
                branch: DEFAULT_BRANCH.to_string(),
                parent: None,
            },
            remote: String::new(),
            configuration: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> ArtResult<Self> {
        if !path.exists() {
            return Err(ArtError::RepositoryMissing);
        }
        let text = fs::read_to_string(path).map_err(|e| ArtError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> ArtResult<()> {
        let text = serde_json::to_string_pretty(self)? + "\n";
        fs::write(path, text).map_err(|e| ArtError::io(path, e))
    }
}
