use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        // Load the staging area from the disk
        staging.rehydrate()?;

        self.write_commit(&mut staging, message, None)?;

        Ok(())
    }

    /// Commit the staged changes on top of HEAD and advance the current branch
    ///
    /// Merge commits pass the given branch's tip as `second_parent` and are created even
    /// when nothing is staged.
    pub(crate) fn write_commit(
        &self,
        staging: &mut Staging,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyCommitMessage.into());
        }

        let mut table = self.branch_table()?;
        let head = self.database().load_commit(table.head()?)?;

        if staging.is_empty() && !head.is_root() && second_parent.is_none() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let added = staging
            .added()
            .iter()
            .map(|(name, content)| {
                let oid = self.database().put_blob(Bytes::from(content.clone()))?;
                Ok((name.clone(), oid))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        let commit = Commit::new_child(
            &head,
            second_parent,
            message.to_string(),
            &added,
            staging.removed().keys(),
            self.commit_timestamp(),
        )?;
        self.database().store_commit(&commit)?;

        table.advance_current(commit.oid().clone());
        self.branches().write(&table)?;

        staging.clear();
        staging.write_updates()?;

        Ok(commit)
    }
}
