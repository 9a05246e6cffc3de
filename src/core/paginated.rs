//! Generic paginated object store (§4.1): a manifest plus size-bounded parts,
//! the universal container behind the root snapshot, the stage, commit
//! history, and stash entries.

use crate::core::change::Change;
use crate::core::error::{ArtError, ArtResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Maximum JSON size, in bytes, of a single part's `changes`/`files` payload
/// before a new part is opened.
pub const MAX_PART_SIZE: usize = 32_000_000;

#[derive(Serialize, Deserialize)]
struct DirManifest {
    parts: Vec<String>,
}

fn io_err(path: &Path, source: std::io::Error) -> ArtError {
    ArtError::io(path, source)
}

/// Split `entries` into size-bounded groups following §4.1's rollover rule:
/// open a new part whenever `current_size + next_size > MAX_PART_SIZE` and
/// the current part is non-empty.
fn chunk_by_size(entries: Vec<(String, Value)>) -> Vec<Vec<(String, Value)>> {
    let mut chunks: Vec<Vec<(String, Value)>> = Vec::new();
    let mut current: Vec<(String, Value)> = Vec::new();
    let mut current_size = 0usize;

    for (key, value) in entries {
        let value_size = serde_json::to_string(&value)
            .map(|s| s.len())
            .unwrap_or(0);
        if !current.is_empty() && current_size + value_size > MAX_PART_SIZE {
            chunks.push(std::mem::take(&mut current));
            current_size = 0;
        }
        current_size += value_size;
        current.push((key, value));
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

// ---------------------------------------------------------------------
// changes-shaped parts: { "changes": { path: ChangeEntry, ... } }
// ---------------------------------------------------------------------

/// Load a `{manifest.json, part.*.json}` directory of `{changes: {...}}`
/// parts. Missing directory or manifest yields an empty mapping.
pub fn load_change_dir(dir: &Path) -> ArtResult<BTreeMap<String, Change>> {
    let manifest_path = dir.join("manifest.json");
    if !manifest_path.exists() {
        return Ok(BTreeMap::new());
    }
    let manifest: DirManifest = serde_json::from_str(
        &fs::read_to_string(&manifest_path).map_err(|e| io_err(&manifest_path, e))?,
    )?;
    load_named_change_parts(dir, &manifest.parts)
}

/// Load a fixed list of part filenames (used by commits, whose own `parts`
/// field is the manifest).
pub fn load_named_change_parts(
    dir: &Path,
    names: &[String],
) -> ArtResult<BTreeMap<String, Change>> {
    let mut merged = BTreeMap::new();
    for name in names {
        let part_path = dir.join(name);
        let text = fs::read_to_string(&part_path).map_err(|e| io_err(&part_path, e))?;
        let part: Value = serde_json::from_str(&text)?;
        let changes = part
            .get("changes")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let changes: BTreeMap<String, Change> = serde_json::from_value(changes)?;
        merged.extend(changes);
    }
    Ok(merged)
}

/// Write a `{manifest.json, part.<i>.json}` directory for `changes`, first
/// removing any prior contents of `dir`. Parts are named `part.<i>.json`.
pub fn save_change_dir(dir: &Path, changes: &BTreeMap<String, Change>) -> ArtResult<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let entries: Vec<(String, Value)> = changes
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap()))
        .collect();
    let chunks = chunk_by_size(entries);

    let mut part_names = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let name = format!("part.{i}.json");
        write_change_part(dir, &name, chunk)?;
        part_names.push(name);
    }

    let manifest = DirManifest { parts: part_names };
    let manifest_path = dir.join("manifest.json");
    fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest)? + "\n",
    )
    .map_err(|e| io_err(&manifest_path, e))?;
    Ok(())
}

/// Write changes as parts named `<prefix>.part.<i>.json` with no manifest of
/// their own (used for commit history, whose master object is the manifest).
/// Returns the list of part filenames written, in order.
pub fn write_commit_parts(
    dir: &Path,
    prefix: &str,
    changes: &BTreeMap<String, Change>,
) -> ArtResult<Vec<String>> {
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let entries: Vec<(String, Value)> = changes
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap()))
        .collect();
    let chunks = chunk_by_size(entries);

    let mut part_names = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let name = format!("{prefix}.part.{i}.json");
        write_change_part(dir, &name, chunk)?;
        part_names.push(name);
    }
    Ok(part_names)
}

fn write_change_part(dir: &Path, name: &str, chunk: &[(String, Value)]) -> ArtResult<()> {
    let mut obj = Map::new();
    for (k, v) in chunk {
        obj.insert(k.clone(), v.clone());
    }
    let part = serde_json::json!({ "changes": Value::Object(obj) });
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(&part)? + "\n").map_err(|e| io_err(&path, e))
}

// ---------------------------------------------------------------------
// files-shaped parts: { "files": [{path, content}, ...] } (root snapshot)
// ---------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct FileRecord {
    path: String,
    content: String,
}

/// Load the root snapshot directory into a path->content map.
pub fn load_root_snapshot(dir: &Path) -> ArtResult<BTreeMap<String, String>> {
    let manifest_path = dir.join("manifest.json");
    if !manifest_path.exists() {
        return Ok(BTreeMap::new());
    }
    let manifest: DirManifest = serde_json::from_str(
        &fs::read_to_string(&manifest_path).map_err(|e| io_err(&manifest_path, e))?,
    )?;

    let mut merged = BTreeMap::new();
    for name in &manifest.parts {
        let part_path = dir.join(name);
        let text = fs::read_to_string(&part_path).map_err(|e| io_err(&part_path, e))?;
        let part: Value = serde_json::from_str(&text)?;
        let files = part
            .get("files")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let records: Vec<FileRecord> = serde_json::from_value(files)?;
        for record in records {
            merged.insert(record.path, record.content);
        }
    }
    Ok(merged)
}

/// Write the root snapshot directory, split into size-bounded parts named
/// `manifest.part.<i>.json`.
pub fn save_root_snapshot(dir: &Path, files: &BTreeMap<String, String>) -> ArtResult<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let entries: Vec<(String, Value)> = files
        .iter()
        .map(|(path, content)| (path.clone(), Value::String(content.clone())))
        .collect();
    let chunks = chunk_by_size(entries);

    let mut part_names = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let name = format!("manifest.part.{i}.json");
        let records: Vec<FileRecord> = chunk
            .iter()
            .map(|(path, content)| FileRecord {
                path: path.clone(),
                content: content.as_str().unwrap_or_default().to_string(),
            })
            .collect();
        let part = serde_json::json!({ "files": records });
        let path = dir.join(&name);
        fs::write(&path, serde_json::to_string_pretty(&part)? + "\n")
            .map_err(|e| io_err(&path, e))?;
        part_names.push(name);
    }

    let manifest = DirManifest { parts: part_names };
    let manifest_path = dir.join("manifest.json");
    fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest)? + "\n",
    )
    .map_err(|e| io_err(&manifest_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_dir_yields_empty_mapping() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("stage");
        assert!(load_change_dir(&dir).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_change_dir_roundtrips() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("stage");
        let mut changes = BTreeMap::new();
        changes.insert(
            "a.txt".to_string(),
            Change::CreateFile {
                content: "hi".into(),
            },
        );
        changes.insert("b.txt".to_string(), Change::DeleteFile);
        save_change_dir(&dir, &changes).unwrap();

        let loaded = load_change_dir(&dir).unwrap();
        assert_eq!(loaded, changes);
    }

    #[test]
    fn empty_input_produces_empty_manifest_no_parts() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("stage");
        save_change_dir(&dir, &BTreeMap::new()).unwrap();

        let manifest: DirManifest =
            serde_json::from_str(&fs::read_to_string(dir.join("manifest.json")).unwrap())
                .unwrap();
        assert!(manifest.parts.is_empty());
    }

    #[test]
    fn save_overwrites_prior_contents() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("stage");
        let mut first = BTreeMap::new();
        first.insert("a.txt".to_string(), Change::DeleteFile);
        save_change_dir(&dir, &first).unwrap();

        let mut second = BTreeMap::new();
        second.insert(
            "b.txt".to_string(),
            Change::CreateFile {
                content: "x".into(),
            },
        );
        save_change_dir(&dir, &second).unwrap();

        let loaded = load_change_dir(&dir).unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn single_entry_exceeding_bound_still_written() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("stage");
        let mut changes = BTreeMap::new();
        changes.insert(
            "huge.txt".to_string(),
            Change::CreateFile {
                content: "x".repeat(MAX_PART_SIZE + 1000),
            },
        );
        save_change_dir(&dir, &changes).unwrap();

        let loaded = load_change_dir(&dir).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn root_snapshot_roundtrips() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("root");
        let mut files = BTreeMap::new();
        files.insert("a.txt".to_string(), "hello\n".to_string());
        save_root_snapshot(&dir, &files).unwrap();

        let loaded = load_root_snapshot(&dir).unwrap();
        assert_eq!(loaded, files);
    }
}
