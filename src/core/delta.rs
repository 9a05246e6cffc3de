//! Compact insert/delete op computation and replay (§4.2).
//!
//! Positions are UTF-8 byte offsets throughout, fixed uniformly across diff,
//! replay, and `add` per the position-semantics design note.

use crate::core::change::Op;

/// A minimal edit script: the common-prefix start, the trimmed old/new tails.
pub struct Edit {
    pub start: usize,
    pub old_end: Option<usize>,
    pub new_end: Option<usize>,
}

/// Compute `start`/`oldEnd`/`newEnd` per §4.2 steps 1-2.
pub fn compute_edit(previous: &str, current: &str) -> Edit {
    let prev = previous.as_bytes();
    let cur = current.as_bytes();

    let mut start = 0usize;
    let max_common = prev.len().min(cur.len());
    while start < max_common && prev[start] == cur[start] {
        start += 1;
    }

    // old_end/new_end are -1-biased: `None` represents the "before index 0"
    // sentinel so the trim loop can run all the way down to `start == 0`
    // without usize underflow.
    let mut old_end: Option<usize> = prev.len().checked_sub(1);
    let mut new_end: Option<usize> = cur.len().checked_sub(1);

    while let (Some(oe), Some(ne)) = (old_end, new_end) {
        if oe < start || ne < start || prev[oe] != cur[ne] {
            break;
        }
        old_end = oe.checked_sub(1);
        new_end = ne.checked_sub(1);
    }

    Edit {
        start,
        old_end,
        new_end,
    }
}

/// Compute the ops that transform `previous` into `current`. Returns `None`
/// if the strings are identical.
pub fn compute_ops(previous: &str, current: &str) -> Option<Vec<Op>> {
    let edit = compute_edit(previous, current);
    let mut ops = Vec::new();

    let old_end_in_range = edit.old_end.map(|oe| oe >= edit.start).unwrap_or(false);
    if old_end_in_range {
        let old_end = edit.old_end.unwrap();
        let del_len = old_end - edit.start + 1;
        if del_len > 0 {
            ops.push(Op::Delete {
                position: edit.start as u32,
                length: del_len as u32,
            });
        }
    }

    let new_end_in_range = edit.new_end.map(|ne| ne >= edit.start).unwrap_or(false);
    if new_end_in_range {
        let new_end = edit.new_end.unwrap();
        let ins = &current[edit.start..=new_end];
        if !ins.is_empty() {
            ops.push(Op::Insert {
                position: edit.start as u32,
                content: ins.to_string(),
            });
        }
    }

    if ops.is_empty() {
        None
    } else {
        Some(ops)
    }
}

/// Apply a sequence of ops to `content`, in order, per §4.3's Ops handling.
pub fn apply_ops(content: &str, ops: &[Op]) -> String {
    let mut bytes = content.as_bytes().to_vec();
    for op in ops {
        match op {
            Op::Delete { position, length } => {
                let pos = *position as usize;
                let len = *length as usize;
                let end = (pos + len).min(bytes.len());
                if pos < bytes.len() {
                    bytes.drain(pos..end);
                }
            }
            Op::Insert { position, content } => {
                let pos = (*position as usize).min(bytes.len());
                bytes.splice(pos..pos, content.as_bytes().iter().copied());
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// A file is binary iff its raw bytes contain a NUL byte.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.contains(&0u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_produce_no_ops() {
        assert!(compute_ops("hello\n", "hello\n").is_none());
    }

    #[test]
    fn s2_capitalize_first_char() {
        let ops = compute_ops("hello\n", "Hello\n").unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Delete {
                    position: 0,
                    length: 1
                },
                Op::Insert {
                    position: 0,
                    content: "H".into()
                },
            ]
        );
        assert_eq!(apply_ops("hello\n", &ops), "Hello\n");
    }

    #[test]
    fn append_at_end() {
        let ops = compute_ops("Hello\n", "Hello World\n").unwrap();
        assert_eq!(apply_ops("Hello\n", &ops), "Hello World\n");
    }

    #[test]
    fn edit_in_middle() {
        let previous = "the quick brown fox";
        let current = "the slow brown fox";
        let ops = compute_ops(previous, current).unwrap();
        assert_eq!(apply_ops(previous, &ops), current);
    }

    #[test]
    fn roundtrip_property_arbitrary_pair() {
        for (p, q) in [
            ("", ""),
            ("", "abc"),
            ("abc", ""),
            ("abc", "abc"),
            ("abcdef", "abXYdef"),
            ("hello world", "hello there world"),
        ] {
            let applied = match compute_ops(p, q) {
                Some(ops) => apply_ops(p, &ops),
                None => p.to_string(),
            };
            assert_eq!(applied, q, "failed for ({p:?}, {q:?})");
        }
    }

    #[test]
    fn detects_binary_via_nul_byte() {
        assert!(is_binary(&[0x00, 0x01]));
        assert!(!is_binary(b"hello\n"));
    }

    #[test]
    fn empty_file_create_and_delete_roundtrip() {
        assert!(compute_ops("", "").is_none());
        let ops = compute_ops("", "x").unwrap();
        assert_eq!(apply_ops("", &ops), "x");
    }
}
