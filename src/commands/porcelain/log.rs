use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// First-parent history of the current branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let table = self.branch_table()?;

        for commit in RevList::new(self.database(), table.head()?.clone()) {
            self.show_commit(&commit?)?;
        }

        Ok(())
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for commit in self.commits_newest_first()? {
            self.show_commit(&commit)?;
        }

        Ok(())
    }

    /// IDs of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let matches = self
            .commits_newest_first()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit in matches {
            writeln!(self.writer(), "{}", commit.oid())?;
        }

        Ok(())
    }

    // the store itself keeps no order; sort for stable output
    fn commits_newest_first(&self) -> anyhow::Result<Vec<Commit>> {
        let mut commits = self.database().list_commits()?;
        commits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.oid().cmp(b.oid()))
        });

        Ok(commits)
    }

    fn show_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", commit.oid())?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(|oid| oid.to_short_oid())
                .collect::<Vec<_>>();
            writeln!(self.writer(), "Merge: {}", parents.join(" "))?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
