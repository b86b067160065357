//! Working tree migration between two snapshots
//!
//! Moving the working tree from HEAD's snapshot to a target snapshot (`switch`, `reset`
//! and fast-forward merges) happens in two steps:
//!
//! 1. Plan: run the safety check, then collect every file the target tracks (to write)
//!    and every file HEAD tracks that the target does not (to delete)
//! 2. Apply: hand the plan to the workspace
//!
//! ## Safety Check
//!
//! A working file that HEAD does not track but the target does would be silently
//! overwritten. Planning aborts with [`RepositoryError::UntrackedFileInTheWay`] before
//! anything is written.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, TrackingMap};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// Working files that `target` would overwrite although `head` does not track them
pub fn untracked_in_the_way<'f>(
    workspace_files: &'f [String],
    head: &TrackingMap,
    target: &TrackingMap,
) -> Vec<&'f str> {
    workspace_files
        .iter()
        .filter(|name| !head.contains_key(*name) && target.contains_key(*name))
        .map(String::as_str)
        .collect()
}

/// Fail with [`RepositoryError::UntrackedFileInTheWay`] if any working file is in the way
pub fn ensure_nothing_in_the_way(
    workspace: &Workspace,
    head: &TrackingMap,
    target: &TrackingMap,
) -> anyhow::Result<()> {
    let workspace_files = workspace.list_files()?;

    if untracked_in_the_way(&workspace_files, head, target).is_empty() {
        Ok(())
    } else {
        Err(RepositoryError::UntrackedFileInTheWay.into())
    }
}

pub struct Migration<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    /// File name -> content the target snapshot tracks
    writes: BTreeMap<String, Bytes>,
    /// Files HEAD tracks that the target snapshot does not
    deletions: BTreeSet<String>,
}

impl<'r> Migration<'r> {
    pub fn new(database: &'r Database, workspace: &'r Workspace) -> Self {
        Migration {
            database,
            workspace,
            writes: BTreeMap::new(),
            deletions: BTreeSet::new(),
        }
    }

    pub fn writes(&self) -> &BTreeMap<String, Bytes> {
        &self.writes
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }

    /// Move the working tree from `head` to `target`
    pub fn apply_changes(&mut self, head: &Commit, target: &Commit) -> anyhow::Result<()> {
        self.plan_changes(head, target)?;
        self.workspace.apply_migration(self)
    }

    fn plan_changes(&mut self, head: &Commit, target: &Commit) -> anyhow::Result<()> {
        ensure_nothing_in_the_way(self.workspace, head.tracking(), target.tracking())?;

        self.writes = target
            .tracking()
            .iter()
            .map(|(name, oid)| Ok((name.clone(), self.database.load_blob(oid)?)))
            .collect::<anyhow::Result<_>>()?;

        self.deletions = head
            .tracking()
            .keys()
            .filter(|name| !target.contains_file(name))
            .cloned()
            .collect();

        Ok(())
    }
}
