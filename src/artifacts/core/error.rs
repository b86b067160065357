//! Repository errors
//!
//! Every condition a user can run into is a variant of [`RepositoryError`] carrying the
//! exact message shown to them. Commands detect these before touching persisted state,
//! and the binary prints them instead of failing.
//!
//! Failures that are not the user's doing (I/O, corrupted objects) travel as plain
//! `anyhow` errors with context attached.

use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Invalid file name: {0:?}.")]
    InvalidFileName(String),

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    #[error("No commit with that id exists.")]
    NoCommitWithId,

    #[error("Ambiguous commit id {0}.")]
    AmbiguousCommitId(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("Invalid branch name: {0}.")]
    InvalidBranchName(String),

    #[error("No need to switch to the current branch.")]
    AlreadyOnBranch,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    /// An object the repository refers to is missing from the database
    #[error("object {0} not found in the object database")]
    ObjectNotFound(ObjectId),
}

impl RepositoryError {
    /// Whether the error is an expected condition to report to the user,
    /// as opposed to a sign of a corrupted repository
    pub fn is_user_error(&self) -> bool {
        !matches!(self, RepositoryError::ObjectNotFound(_))
    }
}

/// Check whether an error chain ends in a user-facing [`RepositoryError`]
pub fn as_user_error(error: &anyhow::Error) -> Option<&RepositoryError> {
    error
        .downcast_ref::<RepositoryError>()
        .filter(|error| error.is_user_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_recognized_through_anyhow() {
        let error = anyhow::Error::from(RepositoryError::MergeWithSelf);
        assert_eq!(as_user_error(&error), Some(&RepositoryError::MergeWithSelf));
        assert_eq!(error.to_string(), "Cannot merge a branch with itself.");
    }

    #[test]
    fn missing_objects_are_not_user_errors() {
        let oid = ObjectId::try_parse("a".repeat(40)).unwrap();
        let error = anyhow::Error::from(RepositoryError::ObjectNotFound(oid));
        assert!(as_user_error(&error).is_none());
    }

    #[test]
    fn plain_failures_are_not_user_errors() {
        let error = anyhow::anyhow!("disk on fire");
        assert!(as_user_error(&error).is_none());
    }
}
