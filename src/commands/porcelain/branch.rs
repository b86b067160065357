use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Create a branch pointing at HEAD without switching to it
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut table = self.branch_table()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if table.contains(&branch_name) {
            return Err(RepositoryError::BranchAlreadyExists.into());
        }

        let head_oid = table.head()?.clone();
        table.insert(branch_name, head_oid);
        self.branches().write(&table)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut table = self.branch_table()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound)?;

        if !table.contains(&branch_name) {
            return Err(RepositoryError::BranchNotFound.into());
        }
        if table.is_current(&branch_name) {
            return Err(RepositoryError::RemoveCurrentBranch.into());
        }

        table.remove(&branch_name)?;
        self.branches().write(&table)?;

        Ok(())
    }
}
