use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Check out the tip of `branch_name` and make it the current branch
    pub async fn switch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut table = self.branch_table()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;

        let target_oid = table
            .get(&branch_name)
            .cloned()
            .ok_or(RepositoryError::NoSuchBranch)?;
        if table.is_current(&branch_name) {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let head = self.database().load_commit(table.head()?)?;
        let target = self.database().load_commit(&target_oid)?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        Migration::new(self.database(), self.workspace()).apply_changes(&head, &target)?;

        table.set_current(branch_name)?;
        self.branches().write(&table)?;

        staging.clear();
        staging.write_updates()?;

        Ok(())
    }
}
