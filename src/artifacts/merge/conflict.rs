//! Conflict markers
//!
//! A conflicted file holds both versions:
//!
//! ```text
//! <<<<<<< HEAD
//! <current content>=======
//! <given content>>>>>>>>
//! ```
//!
//! Contents are inserted verbatim, so a side without a trailing newline runs straight
//! into the next marker.

use bytes::Bytes;

pub const CONFLICT_START: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END: &str = ">>>>>>>\n";

pub fn conflict_markers(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_START.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END.len(),
    );

    content.extend_from_slice(CONFLICT_START.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CONFLICT_END.as_bytes());

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_both_sides() {
        assert_eq!(
            conflict_markers(b"B\n", b"C\n"),
            Bytes::from_static(b"<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n")
        );
    }

    #[test]
    fn absent_sides_are_empty() {
        assert_eq!(
            conflict_markers(b"", b"C\n"),
            Bytes::from_static(b"<<<<<<< HEAD\n=======\nC\n>>>>>>>\n")
        );
    }
}
