//! Staging area
//!
//! Holds the additions and removals that the next commit will apply on top of HEAD.
//! Like the index of the `bit` tooling it is loaded with [`Staging::rehydrate`], mutated in
//! memory and persisted with [`Staging::write_updates`].
//!
//! Both maps are keyed by file name and a name is never staged for addition and removal at
//! the same time.

use crate::areas::state_file::{read_state, write_state};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::staged_changes::StagedChanges;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Staging {
    /// Path to the staging file (typically `.gitlet/staging`)
    path: Box<Path>,
    changes: StagedChanges,
    /// Flag indicating if the staging area has been modified since loading
    changed: bool,
}

impl Staging {
    pub fn new(path: Box<Path>) -> Self {
        Staging {
            path,
            changes: StagedChanges::default(),
            changed: false,
        }
    }

    /// Load the staging area from disk
    ///
    /// A missing staging file is an empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.changes = match read_state(&self.path)? {
            Some(json) if !json.trim().is_empty() => StagedChanges::parse(&json)?,
            _ => StagedChanges::default(),
        };
        self.changed = false;

        Ok(())
    }

    /// Persist the staging area if anything changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        write_state(&self.path, &self.changes.to_json()?)?;
        self.changed = false;

        Ok(())
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Stage `content` for `name`
    ///
    /// Content identical to what HEAD tracks (`head_oid`) is not a change: any staged
    /// addition for the name is dropped instead. A pending removal is always dropped.
    pub fn stage_addition(
        &mut self,
        name: &str,
        content: Bytes,
        head_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let oid = Blob::new(content.clone()).object_id()?;

        self.changes.removed.remove(name);
        if head_oid == Some(&oid) {
            self.changes.added.remove(name);
        } else {
            self.changes.added.insert(name.to_string(), content.to_vec());
        }
        self.changed = true;

        Ok(())
    }

    /// Stage `content` for `name` regardless of what HEAD tracks
    pub fn stage_merge_addition(&mut self, name: &str, content: Bytes) {
        self.changes.removed.remove(name);
        self.changes.added.insert(name.to_string(), content.to_vec());
        self.changed = true;
    }

    /// Drop a staged addition, returning whether there was one
    pub fn unstage_addition(&mut self, name: &str) -> bool {
        let unstaged = self.changes.added.remove(name).is_some();
        self.changed |= unstaged;
        unstaged
    }

    /// Stage the removal of a file HEAD tracks as `head_oid`
    pub fn stage_removal(&mut self, name: &str, head_oid: ObjectId) {
        self.changes.added.remove(name);
        self.changes.removed.insert(name.to_string(), head_oid);
        self.changed = true;
    }

    pub fn clear(&mut self) {
        self.changes.clear();
        self.changed = true;
    }

    pub fn added(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.changes.added
    }

    pub fn removed(&self) -> &BTreeMap<String, ObjectId> {
        &self.changes.removed
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.changes.added.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.changes.removed.contains_key(name)
    }
}
