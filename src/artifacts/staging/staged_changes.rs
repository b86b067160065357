//! Pending additions and removals of the current branch
//!
//! Additions keep the raw file content captured at `add` time; the working copy is
//! never re-read at commit time, and are persisted base64-encoded. Removals keep the
//! blob ID HEAD tracked for the file.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STAGED_CHANGES_KIND: &str = "gitlet.staging";
pub const STAGED_CHANGES_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedChanges {
    kind: String,
    schema_version: u32,
    /// File name -> content to commit
    #[serde(with = "base64_contents")]
    pub added: BTreeMap<String, Vec<u8>>,
    /// File name -> blob ID tracked by HEAD when the removal was staged
    pub removed: BTreeMap<String, ObjectId>,
}

impl Default for StagedChanges {
    fn default() -> Self {
        StagedChanges {
            kind: STAGED_CHANGES_KIND.to_string(),
            schema_version: STAGED_CHANGES_VERSION,
            added: BTreeMap::new(),
            removed: BTreeMap::new(),
        }
    }
}

impl StagedChanges {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let changes: Self = serde_json::from_str(json).context("Unable to parse staging area")?;

        if changes.kind != STAGED_CHANGES_KIND {
            anyhow::bail!(
                "unexpected staging area kind '{}', expected '{}'",
                changes.kind,
                STAGED_CHANGES_KIND
            );
        }

        if changes.schema_version != STAGED_CHANGES_VERSION {
            anyhow::bail!(
                "unsupported staging area schema version {}, expected {}",
                changes.schema_version,
                STAGED_CHANGES_VERSION
            );
        }

        Ok(changes)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Unable to serialize staging area")
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

mod base64_contents {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        contents: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        contents
            .iter()
            .map(|(name, content)| (name, STANDARD.encode(content)))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer)?
            .into_iter()
            .map(|(name, encoded)| {
                let content = STANDARD
                    .decode(&encoded)
                    .map_err(serde::de::Error::custom)?;
                Ok((name, content))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changes_are_empty() {
        let changes = StagedChanges::default();
        assert!(changes.is_empty());
        assert_eq!(StagedChanges::parse(&changes.to_json().unwrap()).unwrap(), changes);
    }

    #[test]
    fn raw_bytes_survive_persistence() {
        let mut changes = StagedChanges::default();
        changes.added.insert("bin.dat".into(), vec![0, 255, 10, 13]);
        changes.removed.insert(
            "gone.txt".into(),
            ObjectId::try_parse("b".repeat(40)).unwrap(),
        );

        let parsed = StagedChanges::parse(&changes.to_json().unwrap()).unwrap();
        assert_eq!(parsed, changes);
        assert!(!parsed.is_empty());
    }

    #[test]
    fn contents_are_stored_as_base64() {
        let mut changes = StagedChanges::default();
        changes.added.insert("wug.txt".into(), b"This is a wug.\n".to_vec());

        let json = changes.to_json().unwrap();
        assert!(json.contains(r#""added":{"wug.txt":"VGhpcyBpcyBhIHd1Zy4K"}"#));
    }

    #[test]
    fn rejects_version_one_byte_arrays() {
        let json = r#"{"kind":"gitlet.staging","schema_version":1,"added":{"a":[97]},"removed":{}}"#;
        assert!(StagedChanges::parse(json).is_err());
    }

    #[test]
    fn rejects_malformed_base64() {
        let json = r#"{"kind":"gitlet.staging","schema_version":2,"added":{"a":"!!"},"removed":{}}"#;
        assert!(StagedChanges::parse(json).is_err());
    }

    #[test]
    fn rejects_foreign_documents() {
        let json = r#"{"kind":"something.else","schema_version":2,"added":{},"removed":{}}"#;
        assert!(StagedChanges::parse(json).is_err());
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut changes = StagedChanges::default();
        changes.added.insert("a.txt".into(), b"a".to_vec());
        changes.removed.insert("b.txt".into(), ObjectId::try_parse("c".repeat(40)).unwrap());

        changes.clear();
        assert!(changes.is_empty());
    }
}
