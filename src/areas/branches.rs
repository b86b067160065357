//! Branch table file
//!
//! Reads and writes `.gitlet/branches`, the only place branch pointers and the current
//! branch are recorded.

use crate::areas::state_file::{read_state, write_state};
use crate::artifacts::branch::branch_table::BranchTable;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Branches {
    /// Path to the branch table (typically `.gitlet/branches`)
    path: Box<Path>,
}

impl Branches {
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read(&self) -> anyhow::Result<BranchTable> {
        let json = read_state(&self.path)?
            .with_context(|| format!("branch table {} is missing", self.path.display()))?;

        BranchTable::parse(&json)
    }

    pub fn write(&self, table: &BranchTable) -> anyhow::Result<()> {
        write_state(&self.path, &table.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn written_tables_read_back_identically() {
        let dir = TempDir::new().unwrap();
        let branches = Branches::new(dir.path().join("branches").into_boxed_path());
        let table = BranchTable::new(ObjectId::try_parse("d".repeat(40)).unwrap());

        assert!(!branches.exists());
        branches.write(&table).unwrap();

        assert!(branches.exists());
        assert_eq!(branches.read().unwrap(), table);
    }

    #[test]
    fn reading_a_missing_table_fails() {
        let dir = TempDir::new().unwrap();
        let branches = Branches::new(dir.path().join("branches").into_boxed_path());

        assert!(branches.read().is_err());
    }
}
