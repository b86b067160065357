//! Staged change set persisted between invocations
//!
//! - `staged_changes`: The versioned on-disk schema of pending additions and removals

pub mod staged_changes;
