//! Core utilities and shared types
//!
//! - `error`: The typed failures every command can report
//! - `pager`: Adapter that lets long output go through the `minus` pager

pub mod error;
pub mod pager;
