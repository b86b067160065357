use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::checkout::migration::{Migration, ensure_nothing_in_the_way};
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::merge::conflict::conflict_markers;
use crate::artifacts::merge::resolution::{MergeAction, plan_merge};
use crate::artifacts::objects::commit::{Commit, TrackingMap};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

impl Repository {
    /// Merge the given branch into the current one
    ///
    /// Every precondition is checked before the working tree or any state file is touched.
    /// Conflicts do not abort the merge: the conflicted files are written with markers
    /// and the merge commit is still created.
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut table = self.branch_table()?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        if !staging.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let given_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound)?;
        let given_oid = table
            .get(&given_name)
            .cloned()
            .ok_or(RepositoryError::BranchNotFound)?;
        if table.is_current(&given_name) {
            return Err(RepositoryError::MergeWithSelf.into());
        }

        let head = self.database().load_commit(table.head()?)?;
        let given = self.database().load_commit(&given_oid)?;
        ensure_nothing_in_the_way(self.workspace(), head.tracking(), given.tracking())?;

        let split_oid = self
            .commit_graph()
            .find_split_point(head.oid(), given.oid())?;

        if split_oid.as_ref() == Some(given.oid()) {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid.as_ref() == Some(head.oid()) {
            self.fast_forward(&mut table, &mut staging, &head, &given)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = match split_oid {
            Some(split_oid) => self.database().load_commit(&split_oid)?.tracking().clone(),
            None => TrackingMap::new(),
        };

        for (file_name, action) in plan_merge(&split, head.tracking(), given.tracking()) {
            match action {
                MergeAction::TakeGiven(oid) => {
                    let content = self.database().load_blob(&oid)?;
                    self.workspace().write_file(&file_name, &content)?;
                    staging.stage_merge_addition(&file_name, content);
                }
                MergeAction::Remove => {
                    if let Some(head_oid) = head.file_oid(&file_name) {
                        staging.stage_removal(&file_name, head_oid.clone());
                    }
                    self.workspace().delete_if_exists(&file_name)?;
                }
                MergeAction::Conflict {
                    current: current_oid,
                    given: given_file_oid,
                } => {
                    let current_content = self.load_optional_blob(current_oid.as_ref())?;
                    let given_content = self.load_optional_blob(given_file_oid.as_ref())?;

                    self.workspace().write_file(
                        &file_name,
                        &conflict_markers(&current_content, &given_content),
                    )?;
                    writeln!(self.writer(), "Encountered a merge conflict.")?;
                }
            }
        }

        let message = format!("Merged {} into {}.", given_name, table.current());
        self.write_commit(&mut staging, &message, Some(given_oid))?;

        Ok(())
    }

    // the current branch is an ancestor of the given one: move it, no merge commit
    fn fast_forward(
        &self,
        table: &mut BranchTable,
        staging: &mut Staging,
        head: &Commit,
        given: &Commit,
    ) -> anyhow::Result<()> {
        Migration::new(self.database(), self.workspace()).apply_changes(head, given)?;

        table.advance_current(given.oid().clone());
        self.branches().write(table)?;

        staging.clear();
        staging.write_updates()
    }

    fn load_optional_blob(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => self.database().load_blob(oid),
            None => Ok(Bytes::new()),
        }
    }
}
