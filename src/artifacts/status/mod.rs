//! Working tree status inspection
//!
//! Compares the working tree against HEAD's snapshot and the staging area.
//!
//! ## Components
//!
//! - `file_change`: Kinds of unstaged modifications
//! - `status_info`: Status information aggregation

pub mod file_change;
pub mod status_info;
