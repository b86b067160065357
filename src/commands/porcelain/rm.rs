use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    pub async fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        let was_staged = staging.unstage_addition(file_name);
        let head_oid = head.file_oid(file_name);

        if !was_staged && head_oid.is_none() {
            return Err(RepositoryError::NoReasonToRemove.into());
        }

        if let Some(head_oid) = head_oid {
            staging.stage_removal(file_name, head_oid.clone());
        }
        staging.write_updates()?;

        if head_oid.is_some() {
            self.workspace().delete_if_exists(file_name)?;
        }

        Ok(())
    }
}
