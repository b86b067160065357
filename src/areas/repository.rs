//! Repository handle
//!
//! Owns every persistent area of one repository and the writer user-facing output goes
//! to. Commands are implemented as `impl Repository` blocks under `commands::porcelain`;
//! each invocation loads what it needs, mutates it, and persists it in the order
//! objects, branch table, staging area.

use crate::areas::branches::Branches;
use crate::areas::database::Database;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::graph::split_point::CommitGraph;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use chrono::{DateTime, FixedOffset};
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata directory under the repository root
pub const GITLET_DIR: &str = ".gitlet";

/// Overrides the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    staging: Arc<Mutex<Staging>>,
    database: Database,
    workspace: Workspace,
    branches: Branches,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let staging = Staging::new(gitlet_path.join("staging").into_boxed_path());
        let database = Database::new(gitlet_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.into_boxed_path());
        let branches = Branches::new(gitlet_path.join("branches").into_boxed_path());

        Ok(Repository {
            writer: RefCell::new(writer),
            staging: Arc::new(Mutex::new(staging)),
            database,
            workspace,
            branches,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&self) -> Arc<Mutex<Staging>> {
        self.staging.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn branches(&self) -> &Branches {
        &self.branches
    }

    pub fn status_inspector(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// The branch table is the last file `init` writes, so an interrupted `init` leaves
    /// a repository that is still uninitialized
    pub fn is_initialized(&self) -> bool {
        self.branches.exists()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotInitialized.into())
        }
    }

    /// Load the branch table, failing if the repository was never initialized
    pub fn branch_table(&self) -> anyhow::Result<BranchTable> {
        self.ensure_initialized()?;
        self.branches.read()
    }

    /// The commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let table = self.branch_table()?;
        self.database.load_commit(table.head()?)
    }

    /// Commit graph over the object database
    pub fn commit_graph(
        &self,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        CommitGraph::new(|oid| Ok(self.database.load_commit(oid)?.to_slim()))
    }

    /// Timestamp for a new commit
    ///
    /// Taken from `GITLET_COMMIT_DATE` when set to an RFC 2822 or
    /// `%Y-%m-%d %H:%M:%S %z` date, the local clock otherwise.
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}
