//! Per-branch result bookkeeping.
//!
//! Evaluation produces two intertwined structures:
//!
//! - **Steps**: one record per literal attempt on a branch, chained backwards
//!   through `prev` to a synthetic root step. A branch *is* its tip step; the
//!   chain behind it is the branch's full history (and the only thing a
//!   branch carries, so fan-out points just hand the same `Rc` tip to many
//!   children).
//! - **Node results**: one record per (graph node, incoming branch), owning
//!   the set of terminal steps reachable under that node, linked upward to
//!   the enclosing node's result.
//!
//! ```text
//! steps:   root ◀─ "foo" ok ◀─ "bar" miss        (prev links, Rc-shared)
//!                    │             │
//! results:        [lit #1]      [lit #2] ─▶ [sequence] ─▶ [<root>]
//!                                               (parent links, arena ids)
//! ```
//!
//! Node results live in a per-parse arena addressed by plain index handles.
//! Every entry is finalized exactly once (its terminals are known), and its
//! parent is assigned exactly once, by the enclosing node, only *after* that
//! enclosing node has finished its own construction. Both rules exist for the
//! matched-set walk: climbing a parent link must only ever reach an entry
//! whose derived views are safe to read.
//!
//! ## Invariants (fatal when violated)
//!
//! - A finalized entry has at least one terminal step.
//! - `finalize` and `set_parent` are called at most once per entry.
//! - Derived views are only read after finalization.
//! - A non-matching step changes neither `match_end` nor `state` relative to
//!   its predecessor.

use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::engine::merge::merge;
use crate::grammar::Suggestion;
use crate::NodeId;

/// Handle into a [`ResultArena`].
pub(crate) type NodeResultId = usize;

/// Outcome of one literal attempt on one branch.
///
/// Immutable once constructed. `match_end` is an absolute byte offset into
/// the original input and is monotonically non-decreasing along the chain.
/// `suggestions` can only be non-empty when `is_match` is false.
pub(crate) struct Step<S> {
    /// The literal's node result this outcome belongs to.
    pub container: NodeResultId,
    /// Previous step on this branch; `None` only at the synthetic root.
    pub prev: Option<Rc<Step<S>>>,
    pub match_end: usize,
    pub is_match: bool,
    pub suggestions: Vec<Suggestion>,
    /// Aggregate state after this step, shared with every branch that has the
    /// same history prefix.
    pub state: Rc<S>,
}

impl<S> Step<S> {
    /// The synthetic root step every evaluation starts from.
    pub fn root(container: NodeResultId, state: S) -> Rc<Self> {
        Rc::new(Step {
            container,
            prev: None,
            match_end: 0,
            is_match: true,
            suggestions: Vec::new(),
            state: Rc::new(state),
        })
    }

    /// A successful literal outcome advancing to `match_end` with `state`.
    pub fn matched(container: NodeResultId, prev: &Rc<Step<S>>, match_end: usize, state: Rc<S>) -> Rc<Self> {
        debug_assert!(match_end >= prev.match_end, "match_end must not decrease along a branch");
        Rc::new(Step {
            container,
            prev: Some(Rc::clone(prev)),
            match_end,
            is_match: true,
            suggestions: Vec::new(),
            state,
        })
    }

    /// A failed literal outcome. Position and state are carried over from the
    /// predecessor untouched; only suggestions are added.
    pub fn unmatched(container: NodeResultId, prev: &Rc<Step<S>>, suggestions: Vec<Suggestion>) -> Rc<Self> {
        Rc::new(Step {
            container,
            prev: Some(Rc::clone(prev)),
            match_end: prev.match_end,
            is_match: false,
            suggestions,
            state: Rc::clone(&prev.state),
        })
    }
}

struct NodeEntry<S> {
    node_id: NodeId,
    parent: Option<NodeResultId>,
    /// `None` until [`ResultArena::finalize`].
    terminals: Option<Vec<Rc<Step<S>>>>,
    matching: OnceCell<Vec<Rc<Step<S>>>>,
    non_matching: OnceCell<Vec<Rc<Step<S>>>>,
    longest: OnceCell<Vec<Rc<Step<S>>>>,
    best: OnceCell<Rc<Step<S>>>,
    suggestions: OnceCell<Vec<Suggestion>>,
}

/// Arena of node results for a single evaluation.
///
/// Created fresh per parse call; nothing in here survives the call.
pub(crate) struct ResultArena<S> {
    entries: Vec<NodeEntry<S>>,
}

impl<S> ResultArena<S> {
    pub fn new() -> Self {
        ResultArena { entries: Vec::new() }
    }

    /// Allocate an entry for a node about to be evaluated.
    pub fn alloc(&mut self, node_id: NodeId) -> NodeResultId {
        self.entries.push(NodeEntry {
            node_id,
            parent: None,
            terminals: None,
            matching: OnceCell::new(),
            non_matching: OnceCell::new(),
            longest: OnceCell::new(),
            best: OnceCell::new(),
            suggestions: OnceCell::new(),
        });
        self.entries.len() - 1
    }

    /// Record the terminal steps reachable under `id`. Called exactly once.
    pub fn finalize(&mut self, id: NodeResultId, terminals: Vec<Rc<Step<S>>>) {
        assert!(!terminals.is_empty(), "internal error: node result {id} finalized with no terminal steps");
        let entry = &mut self.entries[id];
        assert!(entry.terminals.is_none(), "internal error: node result {id} finalized twice");
        entry.terminals = Some(terminals);
    }

    /// Link `child` to its enclosing node's result. Called exactly once, after
    /// the parent itself has been finalized.
    pub fn set_parent(&mut self, child: NodeResultId, parent: NodeResultId) {
        let entry = &mut self.entries[child];
        assert!(entry.parent.is_none(), "internal error: node result {child} parented twice");
        entry.parent = Some(parent);
    }

    pub fn node_id(&self, id: NodeResultId) -> &NodeId {
        &self.entries[id].node_id
    }

    pub fn parent(&self, id: NodeResultId) -> Option<NodeResultId> {
        self.entries[id].parent
    }

    /// All terminal steps under `id`, in deterministic exploration order.
    pub fn terminals(&self, id: NodeResultId) -> &[Rc<Step<S>>] {
        self.entries[id]
            .terminals
            .as_deref()
            .expect("internal error: node result read before finalization")
    }

    /// Terminal steps that matched.
    pub fn matching(&self, id: NodeResultId) -> &[Rc<Step<S>>] {
        self.entries[id]
            .matching
            .get_or_init(|| self.terminals(id).iter().filter(|s| s.is_match).cloned().collect())
    }

    /// Terminal steps that did not match (these carry the suggestions).
    pub fn non_matching(&self, id: NodeResultId) -> &[Rc<Step<S>>] {
        self.entries[id]
            .non_matching
            .get_or_init(|| self.terminals(id).iter().filter(|s| !s.is_match).cloned().collect())
    }

    /// The subset of terminals sharing the maximal `match_end` under `id`.
    pub fn longest(&self, id: NodeResultId) -> &[Rc<Step<S>>] {
        self.entries[id].longest.get_or_init(|| {
            let terminals = self.terminals(id);
            let max = terminals.iter().map(|s| s.match_end).max().expect("terminals are never empty");
            terminals.iter().filter(|s| s.match_end == max).cloned().collect()
        })
    }

    /// Best step under `id`: a matching one from the longest subset when any
    /// exists, otherwise an arbitrary (first) longest one.
    pub fn best(&self, id: NodeResultId) -> &Rc<Step<S>> {
        self.entries[id].best.get_or_init(|| {
            let longest = self.longest(id);
            longest.iter().find(|s| s.is_match).unwrap_or(&longest[0]).clone()
        })
    }

    /// Aggregate match flag: did the longest outcome under `id` match.
    pub fn is_match(&self, id: NodeResultId) -> bool {
        self.best(id).is_match
    }

    /// Merged suggestions over the longest subset under `id`.
    pub fn suggestions(&self, id: NodeResultId) -> &[Suggestion] {
        self.entries[id]
            .suggestions
            .get_or_init(|| merge(self.longest(id).iter().flat_map(|step| step.suggestions.iter())))
    }
}
