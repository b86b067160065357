//! Working directory
//!
//! The working tree is flat: only plain files directly under the repository root take
//! part in version control. Subdirectories (including `.gitlet`) are ignored.

use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

const IGNORED_PATHS: [&str; 3] = [".gitlet", ".", ".."];

/// Characters that would escape the flat tree or break the line-based commit format
const FORBIDDEN_NAME_CHARS: [char; 4] = ['/', '\0', '\n', '\r'];

/// Reject names that cannot be tracked: anything outside the top level of the working
/// tree, the metadata directory, and names the commit format cannot hold
pub fn validate_file_name(name: &str) -> Result<(), RepositoryError> {
    if IGNORED_PATHS.contains(&name) || name.contains(FORBIDDEN_NAME_CHARS) {
        Err(RepositoryError::InvalidFileName(name.to_string()))
    } else {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Names of the plain files in the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list directory {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| !IGNORED_PATHS.contains(&name.as_str()))
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Read a file, or `None` if it is not in the working tree
    pub fn read_file_if_exists(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        if self.path.join(name).is_file() {
            self.read_file(name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    pub fn delete_if_exists(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    /// Delete the files the migration drops, then write the target snapshot
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        migration
            .deletions()
            .iter()
            .try_for_each(|name| self.delete_if_exists(name))?;

        migration
            .writes()
            .iter()
            .try_for_each(|(name, content)| self.write_file(name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn lists_only_top_level_plain_files() {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("nested/c.txt").write_str("c").unwrap();
        dir.child(".gitlet/branches").write_str("{}").unwrap();

        let workspace = Workspace::new(dir.path().into());
        assert_eq!(
            workspace.list_files().unwrap(),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
    }

    #[rstest]
    #[case::newline("a\nb")]
    #[case::carriage_return("notes.txt\r")]
    #[case::nul("a\0b")]
    #[case::nested("dir/f.txt")]
    #[case::metadata(".gitlet")]
    #[case::current_dir(".")]
    #[case::parent_dir("..")]
    fn untrackable_names_are_rejected(#[case] name: &str) {
        assert_eq!(
            validate_file_name(name),
            Err(RepositoryError::InvalidFileName(name.to_string()))
        );
    }

    #[rstest]
    #[case("wug.txt")]
    #[case(".hidden")]
    #[case("with space.txt")]
    #[case("..dots")]
    fn ordinary_names_are_accepted(#[case] name: &str) {
        assert_eq!(validate_file_name(name), Ok(()));
    }

    #[test]
    fn writes_read_back_and_delete() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().into());

        workspace.write_file("f.txt", b"first version").unwrap();
        workspace.write_file("f.txt", b"v2").unwrap();
        assert_eq!(workspace.read_file("f.txt").unwrap(), Bytes::from_static(b"v2"));

        workspace.delete_if_exists("f.txt").unwrap();
        workspace.delete_if_exists("f.txt").unwrap();
        assert_eq!(workspace.read_file_if_exists("f.txt").unwrap(), None);
    }
}
