//! Commit hash computation (§3): SHA-1 over `JSON(changes) + timestamp + message`.
//!
//! Deliberately not content-addressed: two commits with identical changes but
//! different timestamps or messages hash differently.

use crate::core::change::Change;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

pub fn compute_commit_hash(
    changes: &BTreeMap<String, Change>,
    timestamp_ms: u64,
    message: &str,
) -> String {
    let json = serde_json::to_string(changes).expect("change map serialization should not fail");
    let mut hasher = Sha1::new();
    hasher.update(json.as_bytes());
    hasher.update(timestamp_ms.to_string().as_bytes());
    hasher.update(message.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::Change;

    #[test]
    fn deterministic_for_same_inputs() {
        let mut changes = BTreeMap::new();
        changes.insert(
            "a.txt".to_string(),
            Change::CreateFile {
                content: "hi".into(),
            },
        );
        let h1 = compute_commit_hash(&changes, 1000, "msg");
        let h2 = compute_commit_hash(&changes, 1000, "msg");
        assert_eq!(h1, h2);
    }

    #[test]
    fn differs_on_timestamp_or_message() {
        let changes: BTreeMap<String, Change> = BTreeMap::new();
        let h1 = compute_commit_hash(&changes, 1000, "msg");
        let h2 = compute_commit_hash(&changes, 1001, "msg");
        let h3 = compute_commit_hash(&changes, 1000, "other");
        assert_ne!(h1, h2);
        assert_ne!(h1, h3);
    }
}
