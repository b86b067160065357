//! Gitlet: a small local version-control system
//!
//! A content-addressed object store of blobs and commits, named branch pointers, a
//! staging area, and a three-way merge over flat file snapshots, all persisted under
//! `.gitlet/` in the repository root.
//!
//! - `areas`: The persistent parts of a repository and the [`areas::repository::Repository`] handle
//! - `artifacts`: Object model, graph algorithms, merge decisions and other data types
//! - `commands`: One module per user command

/// Trace output for the graph and merge algorithms
///
/// Compiled in only with the `debug_merge` feature; prints to stderr.
///
/// # Example
///
/// ```ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;
