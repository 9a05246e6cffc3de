//! On-disk layout (§6) under `.art/`.

use std::path::{Path, PathBuf};

pub const METADATA_DIR: &str = ".art";
pub const HEAD_FILE: &str = "art.json";

pub fn art_dir(workspace_root: &Path) -> PathBuf {
    workspace_root.join(METADATA_DIR)
}

pub fn head_path(art_dir: &Path) -> PathBuf {
    art_dir.join(HEAD_FILE)
}

pub fn root_snapshot_dir(art_dir: &Path) -> PathBuf {
    art_dir.join("root")
}

pub fn stage_dir(art_dir: &Path) -> PathBuf {
    art_dir.join("stage")
}

pub fn cache_dir(art_dir: &Path) -> PathBuf {
    art_dir.join("cache")
}

pub fn local_branch_dir(art_dir: &Path, branch: &str) -> PathBuf {
    art_dir.join("history").join("local").join(branch)
}

pub fn remote_branch_dir(art_dir: &Path, branch: &str) -> PathBuf {
    art_dir.join("history").join("remote").join(branch)
}
