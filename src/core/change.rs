//! The change-entry tagged union (§3) and its ops.

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single character-offset edit, applied in order within one file's `Ops`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Op {
    Insert { position: u32, content: String },
    Delete { position: u32, length: u32 },
}

/// A value attached to a file path in a commit or stage.
///
/// On disk, `CreateFile`/`DeleteFile` are objects with a `type` field; `Ops`
/// is a bare JSON array.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    CreateFile { content: String },
    DeleteFile,
    Ops(Vec<Op>),
}

impl Change {
    pub fn is_ops(&self) -> bool {
        matches!(self, Change::Ops(_))
    }
}

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Change::CreateFile { content } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "CreateFile")?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Change::DeleteFile => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "DeleteFile")?;
                map.end()
            }
            Change::Ops(ops) => ops.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Change {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(_) => {
                let ops: Vec<Op> = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(Change::Ops(ops))
            }
            Value::Object(ref map) => match map.get("type").and_then(Value::as_str) {
                Some("CreateFile") => {
                    let content = map
                        .get("content")
                        .and_then(Value::as_str)
                        .ok_or_else(|| D::Error::custom("CreateFile missing content"))?
                        .to_string();
                    Ok(Change::CreateFile { content })
                }
                Some("DeleteFile") => Ok(Change::DeleteFile),
                other => Err(D::Error::custom(format!(
                    "unknown change type: {:?}",
                    other
                ))),
            },
            other => Err(D::Error::custom(format!(
                "change entry must be an object or array, got {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_file_roundtrips() {
        let c = Change::CreateFile {
            content: "hello\n".into(),
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn ops_serialize_as_bare_array() {
        let c = Change::Ops(vec![
            Op::Delete {
                position: 0,
                length: 1,
            },
            Op::Insert {
                position: 0,
                content: "H".into(),
            },
        ]);
        let value = serde_json::to_value(&c).unwrap();
        assert!(value.is_array());
        let back: Change = serde_json::from_value(value).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn delete_file_roundtrips() {
        let c = Change::DeleteFile;
        let json = serde_json::to_string(&c).unwrap();
        let back: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
