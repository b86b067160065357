use crate::areas::repository::Repository;
use crate::areas::workspace::validate_file_name;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    pub async fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        validate_file_name(file_name)?;

        let content = self
            .workspace()
            .read_file_if_exists(file_name)?
            .ok_or(RepositoryError::FileNotFound)?;

        let staging = self.staging();
        let mut staging = staging.lock().await;

        // Load the staging area from the disk
        staging.rehydrate()?;
        staging.stage_addition(file_name, content, head.file_oid(file_name))?;
        staging.write_updates()?;

        Ok(())
    }
}
