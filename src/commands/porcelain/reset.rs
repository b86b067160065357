use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, commit_prefix: &str) -> anyhow::Result<()> {
        let mut table = self.branch_table()?;
        let target_oid = self.database().resolve_commit_prefix(commit_prefix)?;

        let head = self.database().load_commit(table.head()?)?;
        let target = self.database().load_commit(&target_oid)?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        Migration::new(self.database(), self.workspace()).apply_changes(&head, &target)?;

        table.advance_current(target_oid);
        self.branches().write(&table)?;

        staging.clear();
        staging.write_updates()?;

        Ok(())
    }
}
