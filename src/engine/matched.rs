//! Matched-set derivation.
//!
//! Dynamic nodes (permutation epochs in particular) need to ask "has graph
//! node X already been satisfied on this branch". The answer is derived, not
//! stored: walk the branch's step chain back to the root, and for every
//! matched literal collect its node id plus the ids of every enclosing node
//! that itself aggregates to a match.
//!
//! The upward climb stops in two places:
//!
//! - at the first ancestor whose aggregate outcome is not a match (a node
//!   that never completed cannot count as consumed), and
//! - at the first id already present in the set, since that ancestor's own
//!   ancestors were necessarily processed when the id was first added.
//!
//! Parent links are only assigned after the enclosing node finishes its own
//! construction, so a climb performed mid-evaluation naturally stops at the
//! construction frontier instead of observing half-built results.

use std::collections::HashSet;
use std::rc::Rc;

use crate::engine::results::{ResultArena, Step};
use crate::NodeId;

/// Query over the node ids one branch has matched so far.
///
/// Handed to dynamic generators; a fresh set is derived for every
/// (branch, dynamic node) pair.
#[derive(Debug, Clone)]
pub struct Matched {
    ids: HashSet<NodeId>,
}

impl Matched {
    /// True when the node with `id` was matched anywhere along this branch.
    pub fn was_matched(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct matched node ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Derive the matched set for the branch whose tip is `tip`.
pub(crate) fn matched_ids<S>(arena: &ResultArena<S>, tip: &Rc<Step<S>>) -> Matched {
    let mut ids = HashSet::new();
    let mut cursor = Some(tip);

    while let Some(step) = cursor {
        if step.is_match {
            let mut at = Some(step.container);
            let mut climbing = false;
            while let Some(rid) = at {
                if climbing && !arena.is_match(rid) {
                    break;
                }
                if !ids.insert(arena.node_id(rid).clone()) {
                    break;
                }
                at = arena.parent(rid);
                climbing = true;
            }
        }
        cursor = step.prev.as_ref();
    }

    Matched { ids }
}
