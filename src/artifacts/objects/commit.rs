//! Commit object
//!
//! Commits are immutable snapshots of every tracked file. They contain:
//! - Parent commit ID(s) (none for the root commit, two for merge commits)
//! - A timestamp (the epoch for the root commit)
//! - The complete tracking map (file name -> blob ID)
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <second-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <file name>
//!
//! <commit message>
//! ```
//!
//! The commit's own ID is the SHA-1 of exactly these bytes, so a commit
//! transitively pins its whole ancestry.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame, hash_content};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// File name -> blob ID for every tracked file of a snapshot
pub type TrackingMap = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only the parent links, which is all the graph traversals need.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, first parent first
    pub parents: Vec<ObjectId>,
}

/// Commit object
///
/// Parents are kept as object IDs and resolved through the database on demand,
/// never as in-memory links.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Self hash, computed once from the serialized fields
    oid: ObjectId,
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    tracking: TrackingMap,
    message: String,
}

impl Commit {
    /// Create the root commit: epoch timestamp, no parents, nothing tracked
    pub fn root() -> anyhow::Result<Self> {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        Self::from_parts(Vec::new(), epoch, TrackingMap::new(), ROOT_COMMIT_MESSAGE.into())
    }

    /// Create a commit on top of `parent`
    ///
    /// The tracking map is resolved eagerly: the parent's map, overlaid with the
    /// staged additions, minus the staged removals.
    pub fn new_child<'a>(
        parent: &Commit,
        second_parent: Option<ObjectId>,
        message: String,
        added: &BTreeMap<String, ObjectId>,
        removed: impl IntoIterator<Item = &'a String>,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<Self> {
        let mut tracking = parent.tracking.clone();
        tracking.extend(added.iter().map(|(name, oid)| (name.clone(), oid.clone())));
        for name in removed {
            tracking.remove(name);
        }

        let parents = std::iter::once(parent.oid.clone())
            .chain(second_parent)
            .collect::<Vec<_>>();

        Self::from_parts(parents, timestamp, tracking, message)
    }

    fn from_parts(
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        tracking: TrackingMap,
        message: String,
    ) -> anyhow::Result<Self> {
        if parents.len() > 2 {
            anyhow::bail!("a commit has at most two parents, got {}", parents.len());
        }

        let mut commit = Commit {
            oid: ObjectId::default(),
            parents,
            timestamp,
            tracking,
            message,
        };
        commit.oid = hash_content(&commit.serialize()?)?;

        Ok(commit)
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn tracking(&self) -> &TrackingMap {
        &self.tracking
    }

    pub fn contains_file(&self, name: &str) -> bool {
        self.tracking.contains_key(name)
    }

    pub fn file_oid(&self, name: &str) -> Option<&ObjectId> {
        self.tracking.get(name)
    }

    pub fn to_slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.oid.clone(),
            parents: self.parents.clone(),
        }
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: invalid timestamp line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;
        let offset = *DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: invalid timezone")?
        .offset();

        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .context("Invalid commit object: timestamp out of range")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, oid) in &self.tracking {
            lines.push(format!("file {} {}", oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        frame(self.object_type(), lines.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tracking = TrackingMap::new();

        for line in header.lines() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                timestamp = Some(Self::parse_timestamp(value)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tracking.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Self::from_parts(parents, timestamp, tracking, message.to_string())
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    // the self hash is fixed at construction
    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(self.oid.clone())
    }
}
