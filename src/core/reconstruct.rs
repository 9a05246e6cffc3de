//! State reconstructor (§4.3): replay root + commit chain up to a target hash.

use crate::core::change::Change;
use crate::core::commit::Commit;
use crate::core::delta;
use crate::core::error::ArtResult;
use crate::core::paginated;
use crate::core::BranchManifest;
use std::collections::BTreeMap;
use std::path::Path;

/// Replay `root_dir`'s snapshot, then the commits in `branch_dir`'s manifest
/// up to and including `target_hash`, into a path->content file map.
///
/// `target_hash = None` returns the root snapshot unmodified.
pub fn get_state_by_hash(
    root_dir: &Path,
    branch_dir: &Path,
    target_hash: Option<&str>,
) -> ArtResult<BTreeMap<String, String>> {
    let mut state = paginated::load_root_snapshot(root_dir)?;

    let Some(target_hash) = target_hash else {
        return Ok(state);
    };

    let manifest = BranchManifest::load(&branch_dir.join("manifest.json"))?;
    for hash in &manifest.commits {
        let commit = Commit::load(&branch_dir.join(format!("{hash}.json")))?;
        let changes = paginated::load_named_change_parts(branch_dir, &commit.parts)?;
        apply_changes(&mut state, &changes);
        if hash == target_hash {
            break;
        }
    }

    Ok(state)
}

/// Apply one commit's (or stage's) change set onto a file-state map.
pub fn apply_changes(state: &mut BTreeMap<String, String>, changes: &BTreeMap<String, Change>) {
    for (path, change) in changes {
        match change {
            Change::CreateFile { content } => {
                state.insert(path.clone(), content.clone());
            }
            Change::DeleteFile => {
                state.remove(path);
            }
            Change::Ops(ops) => {
                let current = state.get(path).cloned().unwrap_or_default();
                let updated = delta::apply_ops(&current, ops);
                state.insert(path.clone(), updated);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paginated::{save_root_snapshot, write_commit_parts};
    use tempfile::tempdir;

    #[test]
    fn no_target_hash_returns_root_only() {
        let temp = tempdir().unwrap();
        let root_dir = temp.path().join("root");
        let mut files = BTreeMap::new();
        files.insert("a.txt".to_string(), "seed\n".to_string());
        save_root_snapshot(&root_dir, &files).unwrap();

        let branch_dir = temp.path().join("history/local/main");
        let state = get_state_by_hash(&root_dir, &branch_dir, None).unwrap();
        assert_eq!(state, files);
    }

    #[test]
    fn replays_commit_chain() {
        let temp = tempdir().unwrap();
        let root_dir = temp.path().join("root");
        save_root_snapshot(&root_dir, &BTreeMap::new()).unwrap();

        let branch_dir = temp.path().join("history/local/main");
        std::fs::create_dir_all(&branch_dir).unwrap();

        let mut c1 = BTreeMap::new();
        c1.insert(
            "a.txt".to_string(),
            Change::CreateFile {
                content: "hello\n".to_string(),
            },
        );
        let parts1 = write_commit_parts(&branch_dir, "c1", &c1).unwrap();
        Commit {
            hash: "c1".to_string(),
            message: "first".to_string(),
            timestamp: 1,
            parent: None,
            parts: parts1,
        }
        .save(&branch_dir.join("c1.json"))
        .unwrap();

        let mut c2 = BTreeMap::new();
        c2.insert(
            "a.txt".to_string(),
            Change::Ops(vec![
                crate::core::change::Op::Delete {
                    position: 0,
                    length: 1,
                },
                crate::core::change::Op::Insert {
                    position: 0,
                    content: "H".to_string(),
                },
            ]),
        );
        let parts2 = write_commit_parts(&branch_dir, "c2", &c2).unwrap();
        Commit {
            hash: "c2".to_string(),
            message: "cap".to_string(),
            timestamp: 2,
            parent: Some("c1".to_string()),
            parts: parts2,
        }
        .save(&branch_dir.join("c2.json"))
        .unwrap();

        BranchManifest {
            commits: vec!["c1".to_string(), "c2".to_string()],
        }
        .save(&branch_dir.join("manifest.json"))
        .unwrap();

        let state = get_state_by_hash(&root_dir, &branch_dir, Some("c2")).unwrap();
        assert_eq!(state.get("a.txt"), Some(&"Hello\n".to_string()));

        let state_at_c1 = get_state_by_hash(&root_dir, &branch_dir, Some("c1")).unwrap();
        assert_eq!(state_at_c1.get("a.txt"), Some(&"hello\n".to_string()));
    }
}
