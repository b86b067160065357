//! Gitlet data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch names and the branch table
//! - `checkout`: Safety check and working tree migration between snapshots
//! - `core`: Shared utilities (errors, pager wrapper)
//! - `graph`: Ancestor sets and split point discovery
//! - `log`: First-parent history traversal
//! - `merge`: Three-way merge decisions and conflict markers
//! - `objects`: Object types (blob, commit) and content addressing
//! - `staging`: Persisted staged change set
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod log;
pub mod merge;
pub mod objects;
pub mod staging;
pub mod status;
