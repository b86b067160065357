use crate::areas::repository::Repository;
use colored::Colorize;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let table = self.branch_table()?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        let status_info = self.status_inspector().initialize(&staging)?;

        writeln!(self.writer(), "=== Branches ===")?;
        for name in table.names() {
            if table.is_current(name) {
                writeln!(self.writer(), "{}", format!("*{}", name).green())?;
            } else {
                writeln!(self.writer(), "{}", name)?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for file in &status_info.staged_files {
            writeln!(self.writer(), "{}", file)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for file in &status_info.removed_files {
            writeln!(self.writer(), "{}", file)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (file, change) in &status_info.workspace_changeset {
            writeln!(self.writer(), "{} {}", file, change)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for file in &status_info.untracked_files {
            writeln!(self.writer(), "{}", file)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
