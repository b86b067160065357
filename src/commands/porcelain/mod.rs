//! Porcelain commands (user-facing Gitlet operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage a file for commit
//! - `commit`: Create a new commit
//! - `rm`: Unstage a file or stage its removal
//! - `log`: Show first-parent history, every commit, or commits by message
//! - `status`: Show branches, staged changes and working tree status
//! - `restore`: Restore a file from HEAD or another commit
//! - `branch`: Create or delete branches
//! - `switch`: Check out a branch
//! - `reset`: Move the current branch to a commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod restore;
pub mod rm;
pub mod status;
pub mod switch;
