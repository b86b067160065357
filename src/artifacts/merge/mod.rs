//! Three-way merge
//!
//! - `resolution`: The per-file decision table over split point, current and given snapshots
//! - `conflict`: Conflict marker formatting

pub mod conflict;
pub mod resolution;
