//! Content addresses
//!
//! Every blob and commit is named by the lowercase hex SHA-1 of its framed bytes. The
//! first two digits pick the fan-out directory under `.gitlet/objects`, the other 38
//! name the file. `log` abbreviates merge parents to seven digits.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SHORT_ID_LENGTH: usize = 7;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Accepts exactly 40 hex digits in either case; stored lowercase
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        anyhow::ensure!(
            id.len() == OBJECT_ID_LENGTH && id.bytes().all(|b| b.is_ascii_hexdigit()),
            "not a {OBJECT_ID_LENGTH}-digit hex object id: {id:?}"
        );

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// `ab/cdef...` relative to the objects directory
    pub fn to_path(&self) -> PathBuf {
        let (fan_out, rest) = self.0.split_at(2);
        [fan_out, rest].iter().collect()
    }

    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_ID_LENGTH].to_owned()
    }

    /// Case-insensitive prefix match
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}
