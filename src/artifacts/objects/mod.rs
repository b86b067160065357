//! Stored object types and operations
//!
//! Everything the repository persists under `.gitlet/objects` is an object identified by
//! the SHA-1 hash of its framed content. There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Full snapshot of tracked files plus message, timestamp and parent links
//!
//! All objects implement serialization/deserialization for the framed format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
