use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::TrackingMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use bytes::Bytes;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Working tree file name -> blob ID of its current content
pub type WorkspaceSnapshot = BTreeMap<String, ObjectId>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    /// Classify every file of HEAD, the staging area and the working tree
    ///
    /// - modified, not staged: tracked by HEAD and not staged, but the working copy
    ///   differs; or staged for addition with different working content
    /// - deleted, not staged: tracked by HEAD and not staged for removal, or staged for
    ///   addition, but missing from the working tree
    /// - untracked: in the working tree, not staged for addition, and either unknown to
    ///   HEAD or staged for removal
    pub fn from_snapshots(
        head: &TrackingMap,
        added: &BTreeMap<String, ObjectId>,
        removed: &FileSet,
        workspace: &WorkspaceSnapshot,
    ) -> Self {
        let mut workspace_changeset = ChangeSet::new();

        let expected = head
            .iter()
            .filter(|(name, _)| !removed.contains(*name) && !added.contains_key(*name))
            .chain(added.iter());

        for (name, expected_oid) in expected {
            match workspace.get(name) {
                None if !removed.contains(name) => {
                    workspace_changeset.insert(name.clone(), WorkspaceChangeType::Deleted);
                }
                Some(oid) if oid != expected_oid => {
                    workspace_changeset.insert(name.clone(), WorkspaceChangeType::Modified);
                }
                _ => {}
            }
        }

        let untracked_files = workspace
            .keys()
            .filter(|name| {
                !added.contains_key(*name) && (!head.contains_key(*name) || removed.contains(*name))
            })
            .cloned()
            .collect();

        StatusInfo {
            staged_files: added.keys().cloned().collect(),
            removed_files: removed.clone(),
            workspace_changeset,
            untracked_files,
        }
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, staging: &Staging) -> anyhow::Result<StatusInfo> {
        let head = self.repository.head_commit()?;

        let added = staging
            .added()
            .iter()
            .map(|(name, content)| Ok((name.clone(), Self::blob_oid(content.clone().into())?)))
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;
        let removed = staging.removed().keys().cloned().collect::<FileSet>();
        let workspace = self.scan_workspace()?;

        Ok(StatusInfo::from_snapshots(
            head.tracking(),
            &added,
            &removed,
            &workspace,
        ))
    }

    fn scan_workspace(&self) -> anyhow::Result<WorkspaceSnapshot> {
        let workspace = self.repository.workspace();

        workspace
            .list_files()?
            .into_iter()
            .map(|name| {
                let oid = Self::blob_oid(workspace.read_file(&name)?)?;
                Ok((name, oid))
            })
            .collect()
    }

    fn blob_oid(content: Bytes) -> anyhow::Result<ObjectId> {
        Blob::new(content).object_id()
    }
}
