//! Persisted branch table
//!
//! Maps every branch name to the commit it points at, plus the name of the
//! current branch. The table is stored as versioned JSON in `.gitlet/branches`:
//!
//! ```json
//! {
//!   "kind": "gitlet.branches",
//!   "schema_version": 1,
//!   "current": "main",
//!   "branches": { "main": "<40 hex chars>" }
//! }
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const BRANCH_TABLE_KIND: &str = "gitlet.branches";
pub const BRANCH_TABLE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    /// Table type identifier.
    kind: String,

    /// Schema version for forward compatibility.
    schema_version: u32,

    /// Name of the checked-out branch; always a key of `branches`.
    current: BranchName,

    branches: BTreeMap<BranchName, ObjectId>,
}

impl BranchTable {
    /// Table of a freshly initialized repository: the default branch at the root commit
    pub fn new(root_oid: ObjectId) -> Self {
        let current = BranchName::default_branch();

        BranchTable {
            kind: BRANCH_TABLE_KIND.to_string(),
            schema_version: BRANCH_TABLE_VERSION,
            branches: BTreeMap::from([(current.clone(), root_oid)]),
            current,
        }
    }

    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let table: Self = serde_json::from_str(json).context("Unable to parse branch table")?;

        if table.kind != BRANCH_TABLE_KIND {
            anyhow::bail!(
                "unexpected branch table kind '{}', expected '{}'",
                table.kind,
                BRANCH_TABLE_KIND
            );
        }

        if table.schema_version != BRANCH_TABLE_VERSION {
            anyhow::bail!(
                "unsupported branch table schema version {}, expected {}",
                table.schema_version,
                BRANCH_TABLE_VERSION
            );
        }

        if !table.branches.contains_key(&table.current) {
            anyhow::bail!("current branch '{}' is missing from the branch table", table.current);
        }

        Ok(table)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Unable to serialize branch table")
    }

    pub fn current(&self) -> &BranchName {
        &self.current
    }

    pub fn is_current(&self, name: &BranchName) -> bool {
        &self.current == name
    }

    /// Commit the current branch points at
    pub fn head(&self) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(&self.current)
            .with_context(|| format!("current branch '{}' has no commit", self.current))
    }

    pub fn get(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    /// Point `name` at `oid`, creating the branch if needed
    pub fn insert(&mut self, name: BranchName, oid: ObjectId) {
        self.branches.insert(name, oid);
    }

    /// Move the current branch to `oid`
    pub fn advance_current(&mut self, oid: ObjectId) {
        self.branches.insert(self.current.clone(), oid);
    }

    pub fn set_current(&mut self, name: BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            anyhow::bail!("branch '{}' does not exist", name);
        }
        self.current = name;
        Ok(())
    }

    pub fn remove(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.is_current(name) {
            anyhow::bail!("cannot remove the current branch '{}'", name);
        }
        self.branches
            .remove(name)
            .with_context(|| format!("branch '{}' does not exist", name))
    }

    /// Branch names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &BranchName> {
        self.branches.keys()
    }
}
