//! The `Repository` handle: the single entry point every workflow,
//! branching, and cache operation goes through.

use crate::core::change::Change;
use crate::core::commit::Commit;
use crate::core::delta;
use crate::core::error::{ArtError, ArtResult};
use crate::core::head::{Active, Head, DEFAULT_BRANCH};
use crate::core::ignore::IgnoreMatcher;
use crate::core::paginated;
use crate::core::reconstruct;
use crate::core::BranchManifest;
use crate::store::layout;
use base64::Engine;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct Repository {
    pub root: PathBuf,
    pub art_dir: PathBuf,
}

pub struct AddOutcome {
    pub added: usize,
}

#[derive(Debug, Default)]
pub struct StatusReport {
    pub active_branch: String,
    pub last_commit: Option<String>,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub ignored: Vec<String>,
}

pub struct FileDiff {
    pub file: String,
    pub deleted: String,
    pub added: String,
}

pub struct DiffReport {
    pub file_diffs: Vec<FileDiff>,
    pub staged: Vec<String>,
}

pub struct CheckoutOutcome {
    pub branch: String,
}

pub struct MergeOutcome {
    pub conflicts: Vec<String>,
}

pub struct StashEntryInfo {
    pub id: String,
    pub date: String,
    pub dir_name: String,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_millis() as u64
}

fn is_control_char(c: char) -> bool {
    let code = c as u32;
    (0x00..=0x1F).contains(&code) || code == 0x7F || (0x80..=0x9F).contains(&code)
}

fn is_os_metadata_name(name: &str) -> bool {
    matches!(name, ".DS_Store" | "Thumbs.db" | "desktop.ini")
}

impl Repository {
    fn head_path(&self) -> PathBuf {
        layout::head_path(&self.art_dir)
    }

    fn root_snapshot_dir(&self) -> PathBuf {
        layout::root_snapshot_dir(&self.art_dir)
    }

    fn stage_dir(&self) -> PathBuf {
        layout::stage_dir(&self.art_dir)
    }

    fn cache_dir(&self) -> PathBuf {
        layout::cache_dir(&self.art_dir)
    }

    fn local_branch_dir(&self, branch: &str) -> PathBuf {
        layout::local_branch_dir(&self.art_dir, branch)
    }

    fn remote_branch_dir(&self, branch: &str) -> PathBuf {
        layout::remote_branch_dir(&self.art_dir, branch)
    }

    /// Walk up from `start` looking for `.art/art.json`.
    pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
        let mut dir = if start.is_dir() {
            start.to_path_buf()
        } else {
            start.parent()?.to_path_buf()
        };
        loop {
            if layout::head_path(&layout::art_dir(&dir)).exists() {
                return Some(dir);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Initialize a new repository rooted at `path`, seeding the root
    /// snapshot from whatever files already exist there.
    pub fn init(path: &Path) -> ArtResult<Self> {
        fs::create_dir_all(path).map_err(|e| ArtError::io(path, e))?;
        let art_dir = layout::art_dir(path);
        let head_file = layout::head_path(&art_dir);
        if head_file.exists() {
            return Err(ArtError::Conflict(
                "a repository already exists here".to_string(),
            ));
        }

        for dir in [
            layout::root_snapshot_dir(&art_dir),
            layout::stage_dir(&art_dir),
            layout::cache_dir(&art_dir),
            layout::local_branch_dir(&art_dir, DEFAULT_BRANCH),
            layout::remote_branch_dir(&art_dir, DEFAULT_BRANCH),
        ] {
            fs::create_dir_all(&dir).map_err(|e| ArtError::io(&dir, e))?;
        }

        let repo = Repository {
            root: path.to_path_buf(),
            art_dir,
        };

        let ignore = IgnoreMatcher::new(&repo.root);
        let mut seed = BTreeMap::new();
        for relpath in repo.walk_working_tree() {
            if ignore.is_ignored_str(&relpath) {
                continue;
            }
            let abs = repo.root.join(&relpath);
            let bytes = fs::read(&abs).map_err(|e| ArtError::io(&abs, e))?;
            let content = if delta::is_binary(&bytes) {
                base64::engine::general_purpose::STANDARD.encode(&bytes)
            } else {
                String::from_utf8_lossy(&bytes).into_owned()
            };
            seed.insert(relpath, content);
        }
        paginated::save_root_snapshot(&repo.root_snapshot_dir(), &seed)?;

        BranchManifest::default().save(&repo.local_branch_dir(DEFAULT_BRANCH).join("manifest.json"))?;
        BranchManifest::default().save(&repo.remote_branch_dir(DEFAULT_BRANCH).join("manifest.json"))?;

        repo.save_head(&Head::new_default())?;
        info!(root = %repo.root.display(), "init");
        Ok(repo)
    }

    /// Open the repository containing (or at) `path`.
    pub fn open(path: &Path) -> ArtResult<Self> {
        let root = Self::find_repo_root(path).ok_or(ArtError::RepositoryMissing)?;
        Ok(Repository {
            art_dir: layout::art_dir(&root),
            root,
        })
    }

    pub fn head(&self) -> ArtResult<Head> {
        Head::load(&self.head_path())
    }

    pub fn save_head(&self, head: &Head) -> ArtResult<()> {
        head.save(&self.head_path())
    }

    /// The file-state map at `head.active.parent` on `head.active.branch`.
    pub fn active_state(&self) -> ArtResult<BTreeMap<String, String>> {
        let head = self.head()?;
        reconstruct::get_state_by_hash(
            &self.root_snapshot_dir(),
            &self.local_branch_dir(&head.active.branch),
            head.active.parent.as_deref(),
        )
    }

    /// The file-state map at a branch's most recent commit.
    pub fn branch_head_state(&self, branch: &str) -> ArtResult<BTreeMap<String, String>> {
        let manifest = BranchManifest::load(&self.local_branch_dir(branch).join("manifest.json"))?;
        reconstruct::get_state_by_hash(
            &self.root_snapshot_dir(),
            &self.local_branch_dir(branch),
            manifest.last().map(|s| s.as_str()),
        )
    }

    /// Relative paths of every file in the working tree, excluding the
    /// metadata directory (invariant 6).
    fn walk_working_tree(&self) -> Vec<String> {
        let mut paths: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.file_name() != layout::METADATA_DIR)
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        paths.sort();
        paths
    }

    /// Compute the change-entry map for `target` against `active_state`,
    /// using add's per-file rules: binary files only ever `CreateFile`,
    /// never re-recorded once tracked; text files diff via the delta engine.
    fn compute_add_changes(
        &self,
        target: &Path,
        active_state: &BTreeMap<String, String>,
    ) -> ArtResult<BTreeMap<String, Change>> {
        let candidates: Vec<String> = if target.is_dir() {
            let ignore = IgnoreMatcher::new(&self.root);
            self.walk_working_tree()
                .into_iter()
                .filter(|p| target == self.root || self.root.join(p).starts_with(target))
                .filter(|p| active_state.contains_key(p) || !ignore.is_ignored_str(p))
                .collect()
        } else {
            let relpath = target
                .strip_prefix(&self.root)
                .unwrap_or(target)
                .to_string_lossy()
                .replace('\\', "/");
            vec![relpath]
        };

        let mut changes = BTreeMap::new();
        for relpath in candidates {
            let abs = self.root.join(&relpath);
            if !abs.exists() {
                continue;
            }
            let bytes = fs::read(&abs).map_err(|e| ArtError::io(&abs, e))?;
            let binary = delta::is_binary(&bytes);

            match active_state.get(&relpath) {
                None => {
                    let content = if binary {
                        base64::engine::general_purpose::STANDARD.encode(&bytes)
                    } else {
                        String::from_utf8_lossy(&bytes).into_owned()
                    };
                    changes.insert(relpath, Change::CreateFile { content });
                }
                Some(_previous) if binary => {
                    // Binary modifications to already-tracked files are not recorded.
                }
                Some(previous) => {
                    let current = String::from_utf8_lossy(&bytes).into_owned();
                    if let Some(ops) = delta::compute_ops(previous, &current) {
                        changes.insert(relpath, Change::Ops(ops));
                    }
                }
            }
        }
        Ok(changes)
    }

    /// add(target) (§4.4).
    pub fn add(&self, target: &Path) -> ArtResult<AddOutcome> {
        let abs = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.root.join(target)
        };
        if !abs.exists() {
            return Err(ArtError::NotFound(format!(
                "path not found: {}",
                target.display()
            )));
        }

        let active_state = self.active_state()?;
        let new_changes = self.compute_add_changes(&abs, &active_state)?;

        let mut stage = paginated::load_change_dir(&self.stage_dir())?;
        for (path, change) in &new_changes {
            stage.insert(path.clone(), change.clone());
        }
        paginated::save_change_dir(&self.stage_dir(), &stage)?;

        info!(target = %target.display(), staged = new_changes.len(), "add");
        Ok(AddOutcome {
            added: new_changes.len(),
        })
    }

    /// commit(message) (§4.4).
    pub fn commit(&self, message: &str) -> ArtResult<Commit> {
        if message.trim().is_empty() {
            return Err(ArtError::InvalidArgument(
                "commit message must not be empty".to_string(),
            ));
        }

        let stage = paginated::load_change_dir(&self.stage_dir())?;
        if stage.is_empty() {
            return Err(ArtError::InvalidArgument(
                "nothing to commit: stage is empty".to_string(),
            ));
        }

        let mut head = self.head()?;
        let timestamp = now_ms();
        let hash = crate::core::compute_commit_hash(&stage, timestamp, message);

        let branch_dir = self.local_branch_dir(&head.active.branch);
        let parts = paginated::write_commit_parts(&branch_dir, &hash, &stage)?;

        let commit = Commit {
            hash: hash.clone(),
            message: message.to_string(),
            timestamp,
            parent: head.active.parent.clone(),
            parts,
        };
        commit.save(&branch_dir.join(format!("{hash}.json")))?;

        let mut manifest = BranchManifest::load(&branch_dir.join("manifest.json"))?;
        manifest.commits.push(hash.clone());
        manifest.save(&branch_dir.join("manifest.json"))?;

        head.active.parent = Some(hash);
        self.save_head(&head)?;

        let stage_dir = self.stage_dir();
        if stage_dir.exists() {
            fs::remove_dir_all(&stage_dir).map_err(|e| ArtError::io(&stage_dir, e))?;
        }

        info!(hash = %commit.hash, branch = %head.active.branch, "commit");
        Ok(commit)
    }

    /// status() (§4.4).
    pub fn status(&self) -> ArtResult<StatusReport> {
        let head = self.head()?;
        let active_state = self.active_state()?;
        let stage = paginated::load_change_dir(&self.stage_dir())?;
        let ignore = IgnoreMatcher::new(&self.root);

        let mut report = StatusReport {
            active_branch: head.active.branch.clone(),
            last_commit: head.active.parent.clone(),
            ..Default::default()
        };

        for relpath in self.walk_working_tree() {
            if stage.contains_key(&relpath) {
                report.staged.push(relpath);
                continue;
            }
            if let Some(tracked) = active_state.get(&relpath) {
                let abs = self.root.join(&relpath);
                let bytes = fs::read(&abs).map_err(|e| ArtError::io(&abs, e))?;
                let current = String::from_utf8_lossy(&bytes).into_owned();
                if &current != tracked {
                    report.modified.push(relpath);
                }
            } else if ignore.is_ignored_str(&relpath) {
                report.ignored.push(relpath);
            } else {
                report.untracked.push(relpath);
            }
        }

        Ok(report)
    }

    /// diff() (§4.4).
    pub fn diff(&self) -> ArtResult<DiffReport> {
        let active_state = self.active_state()?;
        let stage = paginated::load_change_dir(&self.stage_dir())?;

        let mut file_diffs = Vec::new();
        for relpath in self.walk_working_tree() {
            let abs = self.root.join(&relpath);
            let bytes = fs::read(&abs).map_err(|e| ArtError::io(&abs, e))?;

            if delta::is_binary(&bytes) {
                if !active_state.contains_key(&relpath) {
                    file_diffs.push(FileDiff {
                        file: relpath,
                        deleted: String::new(),
                        added: "<Binary Data>".to_string(),
                    });
                }
                continue;
            }

            let current = String::from_utf8_lossy(&bytes).into_owned();
            let previous = active_state.get(&relpath).cloned().unwrap_or_default();
            if previous == current {
                continue;
            }

            let edit = delta::compute_edit(&previous, &current);
            let deleted = match edit.old_end {
                Some(old_end) if old_end >= edit.start => previous[edit.start..=old_end].to_string(),
                _ => String::new(),
            };
            let added = match edit.new_end {
                Some(new_end) if new_end >= edit.start => current[edit.start..=new_end].to_string(),
                _ => String::new(),
            };
            file_diffs.push(FileDiff {
                file: relpath,
                deleted,
                added,
            });
        }

        Ok(DiffReport {
            file_diffs,
            staged: stage.keys().cloned().collect(),
        })
    }

    /// log() (§4.4): branch manifest entries, newest first.
    pub fn log(&self) -> ArtResult<String> {
        let head = self.head()?;
        let branch_dir = self.local_branch_dir(&head.active.branch);
        let manifest = BranchManifest::load(&branch_dir.join("manifest.json"))?;

        let mut lines = Vec::new();
        for hash in manifest.commits.iter().rev() {
            let commit = Commit::load(&branch_dir.join(format!("{hash}.json")))?;
            let when = chrono::DateTime::<chrono::Utc>::from(
                UNIX_EPOCH + std::time::Duration::from_millis(commit.timestamp),
            );
            lines.push(format!(
                "{} {} {}",
                commit.hash,
                when.to_rfc2822(),
                commit.message
            ));
        }
        Ok(lines.join("\n"))
    }

    /// branch listing: local branch directory names, filtered against a
    /// denylist of OS metadata filenames.
    pub fn list_branches(&self) -> ArtResult<Vec<String>> {
        let local_dir = self.art_dir.join("history").join("local");
        if !local_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&local_dir).map_err(|e| ArtError::io(&local_dir, e))? {
            let entry = entry.map_err(|e| ArtError::io(&local_dir, e))?;
            if let Some(name) = entry.file_name().to_str() {
                if !is_os_metadata_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn validate_branch_name(name: &str) -> ArtResult<()> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.chars().any(is_control_char)
            || name.chars().all(|c| c == '.')
        {
            return Err(ArtError::InvalidArgument(format!(
                "illegal branch name: {name}"
            )));
        }
        Ok(())
    }

    /// branch({ name: Some(name) }) create path.
    pub fn create_branch(&self, name: &str) -> ArtResult<()> {
        Self::validate_branch_name(name)?;
        let dest_local = self.local_branch_dir(name);
        if dest_local.exists() {
            return Err(ArtError::Conflict(format!("branch already exists: {name}")));
        }

        let head = self.head()?;
        let src_branch = head.active.branch.clone();
        let src_local = self.local_branch_dir(&src_branch);
        let src_remote = self.remote_branch_dir(&src_branch);
        let src_manifest = BranchManifest::load(&src_local.join("manifest.json"))?;

        fs::create_dir_all(&dest_local).map_err(|e| ArtError::io(&dest_local, e))?;

        for hash in &src_manifest.commits {
            let local_master = src_local.join(format!("{hash}.json"));
            let remote_master = src_remote.join(format!("{hash}.json"));
            let (source_dir, master_path) = if local_master.exists() {
                (src_local.clone(), local_master)
            } else {
                (src_remote.clone(), remote_master)
            };
            let commit = Commit::load(&master_path)?;
            fs::copy(&master_path, dest_local.join(format!("{hash}.json")))
                .map_err(|e| ArtError::io(&master_path, e))?;
            for part in &commit.parts {
                let src_part = source_dir.join(part);
                if src_part.exists() {
                    fs::copy(&src_part, dest_local.join(part)).map_err(|e| ArtError::io(&src_part, e))?;
                }
            }
        }
        src_manifest.save(&dest_local.join("manifest.json"))?;

        let dest_remote = self.remote_branch_dir(name);
        fs::create_dir_all(&dest_remote).map_err(|e| ArtError::io(&dest_remote, e))?;
        BranchManifest {
            commits: src_manifest.commits.clone(),
        }
        .save(&dest_remote.join("manifest.json"))?;

        info!(branch = name, "create_branch");
        Ok(())
    }

    /// branch({ name: Some(name), isDelete: true }).
    pub fn delete_branch(&self, name: &str) -> ArtResult<()> {
        let head = self.head()?;
        if name == head.active.branch {
            return Err(ArtError::Conflict(
                "cannot delete the active branch".to_string(),
            ));
        }
        let local_dir = self.local_branch_dir(name);
        if !local_dir.exists() {
            return Err(ArtError::Conflict(format!("branch does not exist: {name}")));
        }
        fs::remove_dir_all(&local_dir).map_err(|e| ArtError::io(&local_dir, e))?;
        let remote_dir = self.remote_branch_dir(name);
        if remote_dir.exists() {
            fs::remove_dir_all(&remote_dir).map_err(|e| ArtError::io(&remote_dir, e))?;
        }
        info!(branch = name, "delete_branch");
        Ok(())
    }

    /// checkout(branch, { force }) (§4.5).
    pub fn checkout(&self, target: &str, force: bool) -> ArtResult<CheckoutOutcome> {
        if !self.local_branch_dir(target).exists() {
            self.create_branch(target)?;
        }

        let mut head = self.head()?;
        let current_state = self.active_state()?;

        let mut dirty = false;
        for (path, content) in &current_state {
            let abs = self.root.join(path);
            match fs::read(&abs) {
                Ok(bytes) => {
                    let on_disk = String::from_utf8_lossy(&bytes).into_owned();
                    if &on_disk != content {
                        dirty = true;
                        break;
                    }
                }
                Err(_) => {
                    dirty = true;
                    break;
                }
            }
        }

        if dirty && !force {
            return Err(ArtError::Conflict(
                "local changes would be overwritten by checkout".to_string(),
            ));
        }

        let target_manifest =
            BranchManifest::load(&self.local_branch_dir(target).join("manifest.json"))?;
        let target_hash = target_manifest.last().cloned();
        let target_state = reconstruct::get_state_by_hash(
            &self.root_snapshot_dir(),
            &self.local_branch_dir(target),
            target_hash.as_deref(),
        )?;

        for path in current_state.keys() {
            if !target_state.contains_key(path) {
                let abs = self.root.join(path);
                let _ = fs::remove_file(&abs);
            }
        }
        for (path, content) in &target_state {
            let abs = self.root.join(path);
            if let Some(parent) = abs.parent() {
                fs::create_dir_all(parent).map_err(|e| ArtError::io(parent, e))?;
            }
            fs::write(&abs, content).map_err(|e| ArtError::io(&abs, e))?;
        }

        let stage_dir = self.stage_dir();
        if stage_dir.exists() {
            fs::remove_dir_all(&stage_dir).map_err(|e| ArtError::io(&stage_dir, e))?;
        }

        head.active = Active {
            branch: target.to_string(),
            parent: target_hash,
        };
        self.save_head(&head)?;

        info!(branch = %target, "checkout");
        Ok(CheckoutOutcome {
            branch: target.to_string(),
        })
    }

    /// merge(targetBranch) (§4.5): three-way merge, manifest-order ancestor
    /// search, conflict markers written on true conflicts. Never
    /// auto-commits.
    pub fn merge(&self, target_branch: &str) -> ArtResult<MergeOutcome> {
        let head = self.head()?;
        let active_branch = head.active.branch.clone();

        let active_manifest =
            BranchManifest::load(&self.local_branch_dir(&active_branch).join("manifest.json"))?;
        let target_manifest =
            BranchManifest::load(&self.local_branch_dir(target_branch).join("manifest.json"))?;

        let ancestor = active_manifest
            .commits
            .iter()
            .rev()
            .find(|h| target_manifest.commits.contains(h))
            .cloned();

        let base_state = reconstruct::get_state_by_hash(
            &self.root_snapshot_dir(),
            &self.local_branch_dir(&active_branch),
            ancestor.as_deref(),
        )?;
        let ours_state = self.active_state()?;
        let theirs_state = reconstruct::get_state_by_hash(
            &self.root_snapshot_dir(),
            &self.local_branch_dir(target_branch),
            target_manifest.last().map(|s| s.as_str()),
        )?;

        let mut all_paths: Vec<&String> = ours_state.keys().chain(theirs_state.keys()).collect();
        all_paths.sort();
        all_paths.dedup();

        let mut stage = BTreeMap::new();
        let mut conflicts = Vec::new();

        for path in all_paths {
            let ours = ours_state.get(path);
            let theirs = theirs_state.get(path);
            let base = base_state.get(path);

            if ours == theirs {
                continue;
            }

            if base == ours && base != theirs {
                // fast-forward on the file: theirs wins.
                let abs = self.root.join(path);
                match theirs {
                    None => {
                        let _ = fs::remove_file(&abs);
                        stage.insert(path.clone(), Change::DeleteFile);
                    }
                    Some(content) => {
                        if let Some(parent) = abs.parent() {
                            fs::create_dir_all(parent).map_err(|e| ArtError::io(parent, e))?;
                        }
                        fs::write(&abs, content).map_err(|e| ArtError::io(&abs, e))?;
                        stage.insert(
                            path.clone(),
                            Change::CreateFile {
                                content: content.clone(),
                            },
                        );
                    }
                }
            } else if base != ours && base != theirs && ours != theirs {
                let ours_str = ours.cloned().unwrap_or_default();
                let theirs_str = theirs.cloned().unwrap_or_default();
                let marker = format!(
                    "<<<<<<< active\n{ours_str}\n=======\n{theirs_str}\n>>>>>>> {target_branch}\n"
                );
                let abs = self.root.join(path);
                if let Some(parent) = abs.parent() {
                    fs::create_dir_all(parent).map_err(|e| ArtError::io(parent, e))?;
                }
                fs::write(&abs, &marker).map_err(|e| ArtError::io(&abs, e))?;
                stage.insert(path.clone(), Change::CreateFile { content: marker });
                conflicts.push(path.clone());
            }
            // else: fast-forward on ours's side, already reflected, no action.
        }

        paginated::save_change_dir(&self.stage_dir(), &stage)?;

        info!(target_branch, conflicts = conflicts.len(), "merge");
        Ok(MergeOutcome { conflicts })
    }

    /// stash() (§4.6). Returns `None` if there was nothing to stash.
    pub fn stash(&self) -> ArtResult<Option<String>> {
        let head = self.head()?;
        let active_state = self.active_state()?;
        let root = self.root.clone();
        let changes = self.compute_add_changes(&root, &active_state)?;
        if changes.is_empty() {
            return Ok(None);
        }

        let dir_name = format!("stash_{}", now_ms());
        paginated::save_change_dir(&self.cache_dir().join(&dir_name), &changes)?;

        let stage_dir = self.stage_dir();
        if stage_dir.exists() {
            fs::remove_dir_all(&stage_dir).map_err(|e| ArtError::io(&stage_dir, e))?;
        }
        self.checkout(&head.active.branch, true)?;

        info!(dir_name, "stash");
        Ok(Some(dir_name))
    }

    fn stash_dirs_newest_first(&self) -> ArtResult<Vec<(u64, String)>> {
        let cache_dir = self.cache_dir();
        if !cache_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&cache_dir).map_err(|e| ArtError::io(&cache_dir, e))? {
            let entry = entry.map_err(|e| ArtError::io(&cache_dir, e))?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(ts) = name.strip_prefix("stash_").and_then(|s| s.parse::<u64>().ok()) {
                    entries.push((ts, name.to_string()));
                }
            }
        }
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(entries)
    }

    /// stash({ list: true }).
    pub fn stash_list(&self) -> ArtResult<Vec<StashEntryInfo>> {
        let entries = self.stash_dirs_newest_first()?;
        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(k, (ts, dir_name))| {
                let when = chrono::DateTime::<chrono::Utc>::from(
                    UNIX_EPOCH + std::time::Duration::from_millis(ts),
                );
                StashEntryInfo {
                    id: format!("stash@{{{k}}}"),
                    date: when.to_rfc2822(),
                    dir_name,
                }
            })
            .collect())
    }

    /// stash({ pop: true }).
    pub fn stash_pop(&self) -> ArtResult<()> {
        let entries = self.stash_dirs_newest_first()?;
        let (_, dir_name) = entries
            .into_iter()
            .next()
            .ok_or_else(|| ArtError::NotFound("no stash entries".to_string()))?;

        let stash_dir = self.cache_dir().join(&dir_name);
        let changes = paginated::load_change_dir(&stash_dir)?;

        for (path, change) in &changes {
            let abs = self.root.join(path);
            match change {
                Change::CreateFile { content } => {
                    if let Some(parent) = abs.parent() {
                        fs::create_dir_all(parent).map_err(|e| ArtError::io(parent, e))?;
                    }
                    fs::write(&abs, content).map_err(|e| ArtError::io(&abs, e))?;
                }
                Change::DeleteFile => {
                    let _ = fs::remove_file(&abs);
                }
                Change::Ops(ops) => {
                    let current = fs::read_to_string(&abs).unwrap_or_default();
                    let updated = delta::apply_ops(&current, ops);
                    fs::write(&abs, updated).map_err(|e| ArtError::io(&abs, e))?;
                }
            }
        }

        fs::remove_dir_all(&stash_dir).map_err(|e| ArtError::io(&stash_dir, e))?;
        info!(dir_name, "stash_pop");
        Ok(())
    }

    /// reset(hash?) (§4.6).
    pub fn reset(&self, hash: Option<&str>) -> ArtResult<()> {
        let Some(hash) = hash else {
            let stage_dir = self.stage_dir();
            if stage_dir.exists() {
                fs::remove_dir_all(&stage_dir).map_err(|e| ArtError::io(&stage_dir, e))?;
            }
            return Ok(());
        };

        let mut head = self.head()?;
        let branch = head.active.branch.clone();
        let branch_dir = self.local_branch_dir(&branch);

        if !branch_dir.join(format!("{hash}.json")).exists() {
            return Err(ArtError::NotFound(format!("unknown commit: {hash}")));
        }

        let mut manifest = BranchManifest::load(&branch_dir.join("manifest.json"))?;
        let idx = manifest
            .commits
            .iter()
            .position(|h| h == hash)
            .ok_or_else(|| ArtError::NotFound(format!("unknown commit: {hash}")))?;
        manifest.commits.truncate(idx + 1);
        manifest.save(&branch_dir.join("manifest.json"))?;

        head.active.parent = Some(hash.to_string());
        self.save_head(&head)?;

        self.checkout(&branch, true)?;
        info!(hash, "reset");
        Ok(())
    }

    /// remote(url) (§6): with an argument, sets `head.remote`; with none,
    /// reads it back.
    pub fn set_remote(&self, url: &str) -> ArtResult<()> {
        let mut head = self.head()?;
        head.remote = url.to_string();
        self.save_head(&head)
    }

    pub fn remote_url(&self) -> ArtResult<String> {
        let head = self.head()?;
        if head.remote.is_empty() {
            return Err(ArtError::RemoteUnconfigured);
        }
        Ok(head.remote)
    }

    /// fetch/pull/push (§6): the wire protocol that would populate
    /// `history/remote/<branch>/` over a network is out of scope for the
    /// core; these only validate that a remote is configured.
    pub fn fetch(&self) -> ArtResult<()> {
        self.remote_url()?;
        Ok(())
    }

    pub fn pull(&self) -> ArtResult<()> {
        self.remote_url()?;
        Ok(())
    }

    pub fn push(&self) -> ArtResult<()> {
        self.remote_url()?;
        Ok(())
    }

    /// clone(handle, dest) (§6): materializes a fresh repository at `dest`
    /// with `handle` recorded as its remote. The objects themselves are
    /// not transferred (no wire protocol); a subsequent `fetch`/`pull`
    /// would populate history once a sync collaborator exists.
    pub fn clone_from(handle: &str, dest: &Path) -> ArtResult<Self> {
        if dest.exists() && dest.read_dir().map(|mut d| d.next().is_some()).unwrap_or(false) {
            return Err(ArtError::Conflict(format!(
                "destination already exists: {}",
                dest.display()
            )));
        }
        let repo = Self::init(dest)?;
        repo.set_remote(handle)?;
        Ok(repo)
    }

    /// rm(path) (§4.6).
    pub fn rm(&self, path: &str) -> ArtResult<()> {
        let mut stage = paginated::load_change_dir(&self.stage_dir())?;
        stage.insert(path.to_string(), Change::DeleteFile);
        paginated::save_change_dir(&self.stage_dir(), &stage)?;

        let abs = self.root.join(path);
        if abs.exists() {
            fs::remove_file(&abs).map_err(|e| ArtError::io(&abs, e))?;
        }
        debug!(path, "rm");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn s1_create_commit_diff_clean() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");

        let outcome = repo.add(Path::new("a.txt")).unwrap();
        assert_eq!(outcome.added, 1);

        let commit = repo.commit("first").unwrap();
        assert_eq!(commit.message, "first");

        let diff = repo.diff().unwrap();
        assert!(diff.file_diffs.is_empty());
        assert!(diff.staged.is_empty());

        let status = repo.status().unwrap();
        assert!(status.modified.is_empty());
    }

    #[test]
    fn s2_modify_stage_commit_replay() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();

        write(temp.path(), "a.txt", "Hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("cap").unwrap();

        let state = repo.active_state().unwrap();
        assert_eq!(state.get("a.txt"), Some(&"Hello\n".to_string()));
    }

    #[test]
    fn s3_branch_and_diverge() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();
        write(temp.path(), "a.txt", "Hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("cap").unwrap();

        repo.create_branch("feature").unwrap();
        repo.checkout("feature", false).unwrap();
        write(temp.path(), "a.txt", "Hello World\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("extend").unwrap();

        repo.checkout("main", false).unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "Hello\n"
        );

        let main_log = repo.log().unwrap();
        assert_eq!(main_log.lines().count(), 2);

        repo.checkout("feature", false).unwrap();
        let feature_log = repo.log().unwrap();
        assert_eq!(feature_log.lines().count(), 3);
    }

    #[test]
    fn s4_three_way_merge_without_conflict() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();
        write(temp.path(), "a.txt", "Hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("cap").unwrap();

        repo.create_branch("feature").unwrap();
        repo.checkout("feature", false).unwrap();
        write(temp.path(), "a.txt", "Hello World\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("extend").unwrap();

        repo.checkout("main", false).unwrap();
        write(temp.path(), "b.txt", "B");
        repo.add(Path::new("b.txt")).unwrap();
        repo.commit("addB").unwrap();

        repo.checkout("feature", false).unwrap();
        let outcome = repo.merge("main").unwrap();
        assert!(outcome.conflicts.is_empty());

        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "Hello World\n"
        );
        assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "B");
    }

    #[test]
    fn s5_three_way_merge_with_conflict() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();
        write(temp.path(), "a.txt", "Hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("cap").unwrap();

        repo.create_branch("x").unwrap();

        write(temp.path(), "a.txt", "Hola\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("main-edit").unwrap();

        repo.checkout("x", false).unwrap();
        write(temp.path(), "a.txt", "HELLO\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("x-edit").unwrap();

        let head_before = repo.head().unwrap();
        let outcome = repo.merge("main").unwrap();
        assert_eq!(outcome.conflicts, vec!["a.txt".to_string()]);

        let expected = "<<<<<<< active\nHELLO\n\n=======\nHola\n\n>>>>>>> main\n";
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            expected
        );

        let head_after = repo.head().unwrap();
        assert_eq!(head_before.active.parent, head_after.active.parent);
    }

    #[test]
    fn s6_stash_pop() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();

        write(temp.path(), "a.txt", "hey\n");
        let dir_name = repo.stash().unwrap().unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "hello\n"
        );
        assert!(repo.cache_dir().join(&dir_name).exists());

        repo.stash_pop().unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "hey\n"
        );
        assert!(!repo.cache_dir().join(&dir_name).exists());
    }

    #[test]
    fn reset_truncates_manifest_and_moves_head() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "one\n");
        repo.add(Path::new("a.txt")).unwrap();
        let c1 = repo.commit("one").unwrap();
        write(temp.path(), "a.txt", "two\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("two").unwrap();

        repo.reset(Some(&c1.hash)).unwrap();

        let head = repo.head().unwrap();
        assert_eq!(head.active.parent, Some(c1.hash.clone()));

        let manifest =
            BranchManifest::load(&repo.local_branch_dir(&head.active.branch).join("manifest.json"))
                .unwrap();
        assert_eq!(manifest.commits.last(), Some(&c1.hash));
    }

    #[test]
    fn checkout_on_clean_tree_is_idempotent() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();

        repo.checkout("main", true).unwrap();
        let first = repo.active_state().unwrap();
        repo.checkout("main", true).unwrap();
        let second = repo.active_state().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rm_stages_delete_and_unlinks() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        write(temp.path(), "a.txt", "hello\n");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("first").unwrap();

        repo.rm("a.txt").unwrap();
        assert!(!temp.path().join("a.txt").exists());

        let stage = paginated::load_change_dir(&repo.stage_dir()).unwrap();
        assert_eq!(stage.get("a.txt"), Some(&Change::DeleteFile));
    }

    #[test]
    fn branch_name_validation_rejects_illegal_names() {
        assert!(Repository::validate_branch_name("feature/x").is_err());
        assert!(Repository::validate_branch_name("..").is_err());
        assert!(Repository::validate_branch_name("ok-name").is_ok());
    }

    #[test]
    fn fetch_push_pull_require_configured_remote() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        assert!(matches!(repo.fetch().unwrap_err(), ArtError::RemoteUnconfigured));
        assert!(matches!(repo.push().unwrap_err(), ArtError::RemoteUnconfigured));
        assert!(matches!(repo.pull().unwrap_err(), ArtError::RemoteUnconfigured));

        repo.set_remote("teammate/project").unwrap();
        assert_eq!(repo.remote_url().unwrap(), "teammate/project");
        repo.fetch().unwrap();
        repo.push().unwrap();
        repo.pull().unwrap();
    }

    #[test]
    fn clone_from_seeds_remote_and_refuses_existing_dest() {
        let temp = tempdir().unwrap();
        let dest = temp.path().join("clone");
        let repo = Repository::clone_from("teammate/project", &dest).unwrap();
        assert_eq!(repo.remote_url().unwrap(), "teammate/project");

        let err = Repository::clone_from("teammate/project", &dest).unwrap_err();
        assert!(matches!(err, ArtError::Conflict(_)));
    }
}
