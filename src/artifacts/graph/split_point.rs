//! Ancestor traversal and split point discovery
//!
//! Both algorithms walk the commit DAG breadth-first over first and second parent
//! links. Commits are resolved lazily through a loader function, so the graph never
//! has to fit in memory and no in-memory parent pointers exist.
//!
//! ## Ancestor Set
//!
//! Every commit reachable from a start commit, the start commit included. Each commit
//! is visited at most once, so diamond-shaped histories do not blow up the walk.
//!
//! ## Split Point
//!
//! 1. Mark the whole ancestry of the current branch tip as `FROM_CURRENT`
//! 2. Walk breadth-first from the given branch tip, marking `FROM_GIVEN`
//! 3. The first commit reached from the given side that already carries `FROM_CURRENT`
//!    is the split point
//!
//! Breadth-first order reaches nearer ancestors first, so the result is a common
//! ancestor close to both tips.
//!
//! ## Known Limitation
//!
//! In criss-cross histories two common ancestors may exist where neither is an
//! ancestor of the other. The walk returns whichever one is dequeued first from the
//! given side (first parents before second parents), not a unique lowest common
//! ancestor. The merge decision table runs against that single split point.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const FROM_CURRENT = 0b01;
        const FROM_GIVEN = 0b10;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Breadth-first algorithms over the commit DAG
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - Resolves a commit ID to its parent links. Failing to
///   resolve a commit aborts the traversal with that error.
pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Creates a new commit graph over the given loader
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let graph = CommitGraph::new(|oid| Ok(database.load_commit(oid)?.to_slim()));
    /// ```
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `start_commit_id`, itself included
    pub fn ancestor_set(&self, start_commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut states = HashMap::new();
        self.walk(start_commit_id, VisitState::FROM_CURRENT, &mut states, |_| false)?;

        Ok(states.into_keys().collect())
    }

    /// Finds the split point between the current branch tip and the given branch tip
    ///
    /// # Returns
    ///
    /// - `Some(ObjectId)` - The first commit reached from `given_commit_id` that is an
    ///   ancestor of (or equal to) `current_commit_id`
    /// - `None` - If the two tips share no history
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Branched history:
    /// //     A
    /// //    / \
    /// //   B   C
    /// let split = graph.find_split_point(&b, &c)?;
    /// assert_eq!(split, Some(a));
    /// ```
    pub fn find_split_point(
        &self,
        current_commit_id: &ObjectId,
        given_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::new();
        self.walk(current_commit_id, VisitState::FROM_CURRENT, &mut states, |_| false)?;

        debug_log!(
            "Ancestors of current {}: {}",
            current_commit_id,
            states.len()
        );

        let split_point = self.walk(given_commit_id, VisitState::FROM_GIVEN, &mut states, |state| {
            state.contains(VisitState::FROM_CURRENT)
        })?;

        debug_log!(
            "Split point of {} and {}: {:?}",
            current_commit_id,
            given_commit_id,
            split_point
        );

        Ok(split_point)
    }

    /// Breadth-first walk marking every visited commit with `flag`
    ///
    /// A commit already carrying `flag` is skipped, so each commit is expanded at most
    /// once per side. The walk stops at the first commit whose state before marking
    /// satisfies `stop_at` and returns it.
    fn walk(
        &self,
        start_commit_id: &ObjectId,
        flag: VisitState,
        states: &mut HashMap<ObjectId, VisitState>,
        stop_at: impl Fn(VisitState) -> bool,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut queue = VecDeque::from([start_commit_id.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(flag) {
                continue;
            }

            let previous_state = *state;
            *state |= flag;

            debug_log!("Visiting commit {}: state={}", &commit_id, *state);

            if stop_at(previous_state) {
                return Ok(Some(commit_id));
            }

            let commit = (self.commit_loader)(&commit_id)?;
            queue.extend(commit.parents);
        }

        Ok(None)
    }
}
