//! Per-file three-way merge decisions
//!
//! Every file name tracked by the split point (S), the current tip (C) or the given tip
//! (G) is classified with two predicates:
//!
//! - `modified(X)`: X dropped a file S had, or both track it with different content.
//!   A file S lacked is never "modified" in X, even if X added it.
//! - `contained(X)`: X tracks the file.
//!
//! ## Decision Table
//!
//! First matching rule wins:
//!
//! | Current    | Given                   | Split  | Action        |
//! |------------|-------------------------|--------|---------------|
//! | unmodified | removed                 | tracks | remove        |
//! | unmodified | modified                | tracks | take given    |
//! | absent     | present                 | absent | take given    |
//! | modified   | modified, differs from C| any    | conflict      |
//! | present    | present, differs from C | absent | conflict      |
//! | anything else                                 || keep current  |
//!
//! Branch-level outcomes (given is an ancestor, fast-forward) are decided before the
//! table runs and never reach it.

use crate::artifacts::objects::commit::TrackingMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// What the merge does to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Overwrite the working file with the given branch's content and stage it
    TakeGiven(ObjectId),
    /// Stage the removal and delete the working file
    Remove,
    /// Write both sides between conflict markers; absent sides are empty
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

fn modified(file: Option<&ObjectId>, split: Option<&ObjectId>) -> bool {
    match (file, split) {
        (None, Some(_)) => true,
        (Some(file), Some(split)) => file != split,
        (_, None) => false,
    }
}

/// Decide the action for a single file, or `None` to keep the current version
pub fn resolve_file(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<MergeAction> {
    let current_modified = modified(current, split);
    let given_modified = modified(given, split);

    if !current_modified && given_modified {
        return Some(match given {
            Some(given) => MergeAction::TakeGiven(given.clone()),
            None => MergeAction::Remove,
        });
    }

    if split.is_none() && current.is_none() {
        return given.map(|given| MergeAction::TakeGiven(given.clone()));
    }

    let both_modified = current_modified && given_modified;
    let both_added = split.is_none() && current.is_some() && given.is_some();
    if (both_modified || both_added) && current != given {
        return Some(MergeAction::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        });
    }

    None
}

/// Actions for every file of the three snapshots that needs one, sorted by file name
pub fn plan_merge(
    split: &TrackingMap,
    current: &TrackingMap,
    given: &TrackingMap,
) -> BTreeMap<String, MergeAction> {
    let names = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    names
        .into_iter()
        .filter_map(|name| {
            let action = resolve_file(split.get(name), current.get(name), given.get(name));

            debug_log!("Merge decision for {}: {:?}", name, action);

            action.map(|action| (name.clone(), action))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    fn version(seed: Option<char>) -> Option<ObjectId> {
        seed.map(oid)
    }

    fn take(seed: char) -> Option<MergeAction> {
        Some(MergeAction::TakeGiven(oid(seed)))
    }

    fn conflict(current: Option<char>, given: Option<char>) -> Option<MergeAction> {
        Some(MergeAction::Conflict {
            current: version(current),
            given: version(given),
        })
    }

    #[rstest]
    // only given changed the file
    #[case::given_modified(Some('a'), Some('a'), Some('c'), take('c'))]
    #[case::given_removed(Some('a'), Some('a'), None, Some(MergeAction::Remove))]
    // only current changed the file
    #[case::current_modified(Some('a'), Some('b'), Some('a'), None)]
    #[case::current_removed(Some('a'), None, Some('a'), None)]
    // only one side added the file
    #[case::given_added(None, None, Some('c'), take('c'))]
    #[case::current_added(None, Some('b'), None, None)]
    // both sides agree
    #[case::same_modification(Some('a'), Some('b'), Some('b'), None)]
    #[case::both_removed(Some('a'), None, None, None)]
    #[case::same_addition(None, Some('b'), Some('b'), None)]
    #[case::untouched(Some('a'), Some('a'), Some('a'), None)]
    // both sides disagree
    #[case::both_modified(Some('a'), Some('b'), Some('c'), conflict(Some('b'), Some('c')))]
    #[case::current_removed_given_modified(Some('a'), None, Some('c'), conflict(None, Some('c')))]
    #[case::current_modified_given_removed(Some('a'), Some('b'), None, conflict(Some('b'), None))]
    #[case::different_additions(None, Some('b'), Some('c'), conflict(Some('b'), Some('c')))]
    fn decision_table(
        #[case] split: Option<char>,
        #[case] current: Option<char>,
        #[case] given: Option<char>,
        #[case] expected: Option<MergeAction>,
    ) {
        let action = resolve_file(
            version(split).as_ref(),
            version(current).as_ref(),
            version(given).as_ref(),
        );
        assert_eq!(action, expected);
    }

    #[test]
    fn plan_covers_the_union_of_all_snapshots() {
        let split = TrackingMap::from([
            ("kept.txt".to_string(), oid('a')),
            ("dropped.txt".to_string(), oid('a')),
            ("fought.txt".to_string(), oid('a')),
        ]);
        let current = TrackingMap::from([
            ("kept.txt".to_string(), oid('a')),
            ("dropped.txt".to_string(), oid('a')),
            ("fought.txt".to_string(), oid('b')),
            ("mine.txt".to_string(), oid('b')),
        ]);
        let given = TrackingMap::from([
            ("kept.txt".to_string(), oid('a')),
            ("fought.txt".to_string(), oid('c')),
            ("theirs.txt".to_string(), oid('c')),
        ]);

        let plan = plan_merge(&split, &current, &given);

        assert_eq!(
            plan,
            BTreeMap::from([
                ("dropped.txt".to_string(), MergeAction::Remove),
                (
                    "fought.txt".to_string(),
                    MergeAction::Conflict {
                        current: Some(oid('b')),
                        given: Some(oid('c')),
                    }
                ),
                ("theirs.txt".to_string(), MergeAction::TakeGiven(oid('c'))),
            ])
        );
    }
}
