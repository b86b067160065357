//! Checkout operations
//!
//! Switching the working tree between snapshots by:
//! - Refusing to overwrite files HEAD does not track
//! - Writing every file of the target snapshot
//! - Deleting files only HEAD tracks
//!
//! The safety check runs before any change is made to the working directory.

pub mod migration;
