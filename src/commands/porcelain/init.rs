use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;

        let root = Commit::root()?;
        self.database().store_commit(&root)?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.clear();
        staging
            .write_updates()
            .context("Failed to create .gitlet/staging file")?;

        // the branch table marks the repository as initialized
        self.branches()
            .write(&BranchTable::new(root.oid().clone()))
            .context("Failed to create the branch table")?;

        Ok(())
    }
}
