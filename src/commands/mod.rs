//! Command implementations
//!
//! - `porcelain`: User-facing commands for version control workflows (add, commit, log, etc.)
//!
//! Every command is an `impl Repository` block writing its output through the
//! repository's writer.

pub mod porcelain;
