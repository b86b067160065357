//! Core repository components
//!
//! This module contains the persistent areas of a Gitlet repository:
//!
//! - `branches`: The branch table file (branch pointers and the current branch)
//! - `database`: Object database for storing blobs and commits
//! - `repository`: High-level repository operations and coordination
//! - `staging`: Staging area of pending additions and removals
//! - `state_file`: Locked, atomic reads and writes of JSON state files
//! - `workspace`: Working directory file system operations

pub(crate) mod branches;
pub(crate) mod database;
pub mod repository;
pub(crate) mod staging;
pub(crate) mod state_file;
pub(crate) mod workspace;
