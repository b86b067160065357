use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Overwrite the working copy of `file_name` with its version in HEAD, or in the
    /// commit `commit_prefix` abbreviates
    ///
    /// The staging area is left untouched.
    pub fn restore(&mut self, commit_prefix: Option<&str>, file_name: &str) -> anyhow::Result<()> {
        let commit = match commit_prefix {
            Some(prefix) => {
                self.ensure_initialized()?;
                let oid = self.database().resolve_commit_prefix(prefix)?;
                self.database().load_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        if !commit.contains_file(file_name) {
            return Err(RepositoryError::FileNotInCommit.into());
        }

        let content = self.database().load_file(&commit, file_name)?;
        self.workspace().write_file(file_name, &content)?;

        Ok(())
    }
}
