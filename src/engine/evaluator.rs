//! The recursive expression-graph evaluator.
//!
//! This module is the operational core of the engine: it walks a grammar
//! top-down against one input string, fanning out a branch per alternative
//! and recording every literal outcome on the result chain.
//!
//! Per node kind:
//!
//! ```text
//! Literal   execute the anchored pattern at the branch position
//!             hit  -> one matched step (state advanced and frozen)
//!             miss -> one unmatched step (suggestions resolved)
//! Sequence  breadth-first per child: every live branch is run through the
//!           child; misses park in `dead`, hits become the next live set;
//!           stops early once nothing is live
//! Union     every alternate evaluated from the same incoming branch
//! Dynamic   derive the branch's matched set, run the generator, evaluate
//!           whatever it produced
//! ```
//!
//! Branching is pure fan-out: a branch is an `Rc` step chain, so handing one
//! prior to many children shares history instead of copying it. The search is
//! exhaustive by design (permutations is combinatorial in the worst case);
//! the only pruning is a sequence dropping its remaining children once no
//! branch is live.
//!
//! Node results are finalized bottom-up and child results are parented only
//! after the enclosing result is finalized, which is what keeps the
//! matched-set climb (see `matched.rs`) from reading half-built entries.
//!
//! ## Debugging
//!
//! Set `PROMPTLING_DEBUG_EVAL=1` to print per-node trace information.

use std::rc::Rc;

use crate::engine::matched::matched_ids;
use crate::engine::metrics::RunMetrics;
use crate::engine::results::{NodeResultId, ResultArena, Step};
use crate::grammar::{ExprKind, Expression, LiteralNode, PatternSource, SuggestionSource};
use crate::{NodeId, ROOT_ID};

/// One evaluation of one grammar against one input.
///
/// Created fresh per parse call; owns the result arena and the work counters.
pub(crate) struct Evaluator<'i, S> {
    input: &'i str,
    pub arena: ResultArena<S>,
    pub metrics: RunMetrics,
    debug: bool,
}

impl<'i, S: Clone> Evaluator<'i, S> {
    pub fn new(input: &'i str) -> Self {
        Evaluator {
            input,
            arena: ResultArena::new(),
            metrics: RunMetrics::default(),
            debug: std::env::var_os("PROMPTLING_DEBUG_EVAL").is_some(),
        }
    }

    /// Evaluate `expr` from a synthetic root step carrying `initial` state.
    ///
    /// Returns the root node result; its terminals cover every branch tip the
    /// whole exploration produced.
    pub fn run(&mut self, expr: &Expression<S>, initial: S) -> NodeResultId {
        let root = self.arena.alloc(ROOT_ID.to_string());
        let prior = Step::root(root, initial);
        let result = self.eval(expr, effective_id(expr, ROOT_ID, 0), &prior);

        let terminals = self.arena.terminals(result).to_vec();
        self.arena.finalize(root, terminals);
        self.arena.set_parent(result, root);
        self.metrics.terminals = self.arena.terminals(root).len();
        self.metrics.longest_len = self.arena.best(root).match_end;
        root
    }

    fn eval(&mut self, expr: &Expression<S>, node_id: NodeId, prior: &Rc<Step<S>>) -> NodeResultId {
        self.metrics.nodes_evaluated += 1;
        match &*expr.kind {
            ExprKind::Literal(lit) => self.eval_literal(lit, node_id, prior),
            ExprKind::Sequence(children) => self.eval_sequence(children, node_id, prior),
            ExprKind::Union(alternates) => self.eval_union(alternates, node_id, prior),
            ExprKind::Dynamic(generate) => self.eval_dynamic(generate.as_ref(), node_id, prior),
        }
    }

    /// A literal always yields exactly one step; it never branches.
    fn eval_literal(&mut self, lit: &LiteralNode<S>, node_id: NodeId, prior: &Rc<Step<S>>) -> NodeResultId {
        self.metrics.literal_attempts += 1;
        let rid = self.arena.alloc(node_id);
        let remainder = &self.input[prior.match_end..];

        let resolved;
        let pattern = match &lit.pattern {
            PatternSource::Fixed(p) => p,
            PatternSource::FromState(f) => {
                resolved = f(&prior.state);
                &resolved
            }
        };

        let step = match pattern.execute(remainder) {
            Some(m) => {
                let state = match &lit.updater {
                    Some(updater) => {
                        // Draft copy of the branch state; frozen the moment
                        // the updater returns, never shared while mutable.
                        let mut draft = (*prior.state).clone();
                        updater(&mut draft, &m.captures);
                        Rc::new(draft)
                    }
                    None => Rc::clone(&prior.state),
                };
                if self.debug {
                    eprintln!(
                        "[literal:hit] id={:?} span={}..{}",
                        self.arena.node_id(rid),
                        prior.match_end,
                        prior.match_end + m.matched_len
                    );
                }
                Step::matched(rid, prior, prior.match_end + m.matched_len, state)
            }
            None => {
                let suggestions = match &lit.suggestions {
                    SuggestionSource::Fixed(list) => list.clone(),
                    // Suggestion functions see the original full input, not
                    // the remainder the pattern was executed against.
                    SuggestionSource::FromState(f) => f(&prior.state, self.input),
                };
                if self.debug {
                    eprintln!(
                        "[literal:miss] id={:?} at={} suggestions={}",
                        self.arena.node_id(rid),
                        prior.match_end,
                        suggestions.len()
                    );
                }
                Step::unmatched(rid, prior, suggestions)
            }
        };

        self.arena.finalize(rid, vec![step]);
        rid
    }

    fn eval_sequence(&mut self, children: &[Expression<S>], node_id: NodeId, prior: &Rc<Step<S>>) -> NodeResultId {
        let rid = self.arena.alloc(node_id.clone());
        let mut live: Vec<Rc<Step<S>>> = vec![Rc::clone(prior)];
        let mut dead: Vec<Rc<Step<S>>> = Vec::new();
        let mut child_results: Vec<NodeResultId> = Vec::new();

        for (ordinal, child) in children.iter().enumerate() {
            if live.is_empty() {
                // Every branch has already failed; the remaining children can
                // never be reached.
                break;
            }
            let child_id = effective_id(child, &node_id, ordinal);
            let mut next_live = Vec::new();
            for branch in &live {
                let child_rid = self.eval(child, child_id.clone(), branch);
                child_results.push(child_rid);
                next_live.extend_from_slice(self.arena.matching(child_rid));
                dead.extend_from_slice(self.arena.non_matching(child_rid));
            }
            if self.debug {
                eprintln!(
                    "[sequence:step] id={node_id:?} child={ordinal} live={} dead={}",
                    next_live.len(),
                    dead.len()
                );
            }
            live = next_live;
        }

        let mut terminals = live;
        terminals.append(&mut dead);
        self.arena.finalize(rid, terminals);
        for child_rid in child_results {
            self.arena.set_parent(child_rid, rid);
        }
        rid
    }

    /// Alternates are independent: each sees the same incoming branch and
    /// none of them sees another's effects.
    fn eval_union(&mut self, alternates: &[Expression<S>], node_id: NodeId, prior: &Rc<Step<S>>) -> NodeResultId {
        let rid = self.arena.alloc(node_id.clone());
        let mut terminals: Vec<Rc<Step<S>>> = Vec::new();
        let mut child_results: Vec<NodeResultId> = Vec::new();

        for (ordinal, alternate) in alternates.iter().enumerate() {
            let child_rid = self.eval(alternate, effective_id(alternate, &node_id, ordinal), prior);
            child_results.push(child_rid);
            terminals.extend_from_slice(self.arena.terminals(child_rid));
        }

        self.arena.finalize(rid, terminals);
        for child_rid in child_results {
            self.arena.set_parent(child_rid, rid);
        }
        rid
    }

    /// The generator runs fresh for every (branch, node) pair; its output can
    /// legitimately differ per branch, so it is never cached.
    fn eval_dynamic(
        &mut self,
        generate: &dyn Fn(&S, &crate::engine::matched::Matched) -> Expression<S>,
        node_id: NodeId,
        prior: &Rc<Step<S>>,
    ) -> NodeResultId {
        self.metrics.generator_calls += 1;
        let rid = self.arena.alloc(node_id.clone());
        let matched = matched_ids(&self.arena, prior);
        if self.debug {
            eprintln!("[dynamic:generate] id={node_id:?} matched_ids={}", matched.len());
        }

        let produced = generate(&prior.state, &matched);
        let child_rid = self.eval(&produced, effective_id(&produced, &node_id, 0), prior);

        let terminals = self.arena.terminals(child_rid).to_vec();
        self.arena.finalize(rid, terminals);
        self.arena.set_parent(child_rid, rid);
        rid
    }
}

/// Explicit id when the expression has one, positional otherwise.
fn effective_id<S>(expr: &Expression<S>, parent: &str, ordinal: usize) -> NodeId {
    expr.id.clone().unwrap_or_else(|| format!("{parent}.{ordinal}"))
}
