//! Commit graph traversals
//!
//! Ancestor sets and split point discovery over parent links resolved on demand.

pub mod split_point;
