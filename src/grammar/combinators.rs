//! Derived combinators.
//!
//! Everything here is expressed purely in terms of the four primitives in
//! `expr.rs`; no combinator has engine-internal privileges. The recursive
//! shapes (`repeated`, `permutations`) build their recursion through closures
//! re-invoked by dynamic nodes, so a fragment is only materialized for a
//! branch that actually reaches it.

use crate::engine::matched::Matched;
use crate::engine::pattern::Pattern;
use crate::error::GrammarError;
use crate::grammar::expr::{dynamic, literal, seq_unchecked, union_unchecked, Expression};

/// A literal that vacuously matches the empty string.
pub fn match_empty<S>() -> Expression<S> {
    literal(Pattern::empty()).build()
}

/// A literal that never matches, empty input included.
fn reject<S>() -> Expression<S> {
    literal(Pattern::never()).build()
}

/// `optional(E)`: a union of "skip" (vacuous empty match) and "attempt E".
///
/// The skip branch always succeeds, so an optional node never fails outright
/// and the overall result matches at least as much as `E` alone would.
pub fn optional<S>(expr: impl Into<Expression<S>>) -> Expression<S> {
    union_unchecked(vec![match_empty(), expr.into()])
}

/// What a [`conditional`] evaluates to when its condition is false.
pub enum Fallback<S> {
    /// Match the empty string and continue. The default.
    MatchEmpty,
    /// Fail unconditionally, regardless of how much input remains.
    Reject,
    /// Evaluate a caller-supplied expression instead.
    Expr(Expression<S>),
}

impl<S> Default for Fallback<S> {
    fn default() -> Self {
        Fallback::MatchEmpty
    }
}

/// Pick an expression from the branch state: `if_true` when `condition` holds,
/// the fallback otherwise.
pub fn conditional<S: 'static>(
    condition: impl Fn(&S) -> bool + 'static,
    if_true: impl Into<Expression<S>>,
    fallback: Fallback<S>,
) -> Expression<S> {
    let if_true = if_true.into();
    dynamic(move |state, _| {
        if condition(state) {
            if_true.clone()
        } else {
            match &fallback {
                Fallback::MatchEmpty => match_empty(),
                Fallback::Reject => reject(),
                Fallback::Expr(expr) => expr.clone(),
            }
        }
    })
}

/// Match `expr` between `min` and `max` times (`None` = unbounded).
///
/// The continuation after each occurrence lives inside a dynamic node, so an
/// unbounded repetition never materializes more than one node ahead of what
/// the input supports. An `expr` that can match the empty string will recurse
/// without bound; give such patterns a finite `max`.
pub fn repeated<S: 'static>(
    expr: impl Into<Expression<S>>,
    min: usize,
    max: Option<usize>,
) -> Result<Expression<S>, GrammarError> {
    if let Some(max) = max {
        if max < min {
            return Err(GrammarError::RepeatBounds { min, max });
        }
    }
    Ok(repeated_unchecked(expr.into(), min, max))
}

fn repeated_unchecked<S: 'static>(expr: Expression<S>, min: usize, max: Option<usize>) -> Expression<S> {
    if max == Some(0) {
        return match_empty();
    }
    let continuation = {
        let expr = expr.clone();
        dynamic(move |_, _| repeated_unchecked(expr.clone(), min.saturating_sub(1), max.map(|m| m - 1)))
    };
    let body = seq_unchecked(vec![expr, continuation]);
    if min == 0 { optional(body) } else { body }
}

/// Match every required member exactly once and each optional member at most
/// once, in any order, with the default member-id base.
///
/// Use [`permutations_with_id`] when a grammar embeds more than one
/// permutation group, so the groups' member ids cannot collide.
pub fn permutations<S: 'static>(
    required: Vec<Expression<S>>,
    optional_members: Vec<Expression<S>>,
) -> Expression<S> {
    permutations_with_id(required, optional_members, "permutations")
}

/// [`permutations`] with an explicit id base.
///
/// Members without an explicit id get `"{base}.required.{i}"` or
/// `"{base}.optional.{i}"` at build time; those ids are what later epochs
/// query through the matched set to exclude members a branch has already
/// consumed. Each epoch node is one recursive unrolling step ("one more
/// member consumed") and is only generated for branches that reach it, so
/// non-matching orderings die immediately instead of being enumerated.
pub fn permutations_with_id<S: 'static>(
    mut required: Vec<Expression<S>>,
    mut optional_members: Vec<Expression<S>>,
    base: impl Into<String>,
) -> Expression<S> {
    let base = base.into();
    for (i, member) in required.iter_mut().enumerate() {
        if member.id.is_none() {
            member.id = Some(format!("{base}.required.{i}"));
        }
    }
    for (i, member) in optional_members.iter_mut().enumerate() {
        if member.id.is_none() {
            member.id = Some(format!("{base}.optional.{i}"));
        }
    }
    epoch(required, optional_members, base, 0)
}

fn epoch<S: 'static>(
    required: Vec<Expression<S>>,
    optional_members: Vec<Expression<S>>,
    base: String,
    n: usize,
) -> Expression<S> {
    let id = format!("{base}[epoch-{n}]");
    let generator_base = base.clone();
    dynamic(move |_state, matched| {
        let remaining_required: Vec<_> =
            required.iter().filter(|m| !member_matched(m, matched)).cloned().collect();
        let remaining_optional: Vec<_> =
            optional_members.iter().filter(|m| !member_matched(m, matched)).cloned().collect();

        if remaining_required.is_empty() && remaining_optional.is_empty() {
            return match_empty();
        }

        let mut alternates = remaining_required.clone();
        alternates.extend(remaining_optional.iter().cloned());
        let next = union_unchecked(alternates);
        let continuation = seq_unchecked(vec![
            next,
            epoch(remaining_required.clone(), remaining_optional, generator_base.clone(), n + 1),
        ]);

        if remaining_required.is_empty() { optional(continuation) } else { continuation }
    })
    .with_id(id)
}

fn member_matched<S>(member: &Expression<S>, matched: &Matched) -> bool {
    member.id.as_deref().is_some_and(|id| matched.was_matched(id))
}
