//! Expression graph data model and primitive builders.
//!
//! A grammar is a graph of [`Expression`] nodes over four primitive kinds:
//!
//! ```text
//! Literal   leaf; a pattern that consumes input, updating state on a match
//!           and contributing suggestions on a miss
//! Sequence  children matched in order, each picking up where the last ended
//! Union     alternates matched independently from the same position
//! Dynamic   generates its actual child at evaluation time, per branch, from
//!           the branch state and the set of already-matched node ids
//! ```
//!
//! Expressions are cheap-to-clone handles (the node payload sits behind an
//! `Rc`), so combinators and dynamic generators can hand fragments around by
//! value. The engine never mutates a graph it is given.
//!
//! Node identity: an expression may carry an explicit id (stable across every
//! branch and every dynamically generated occurrence); nodes without one get a
//! positional id assigned by the engine during evaluation.

use std::rc::Rc;

use crate::engine::matched::Matched;
use crate::engine::pattern::{Captures, Pattern};
use crate::error::GrammarError;
use crate::grammar::suggestion::Suggestion;
use crate::NodeId;

/// Where a literal's pattern comes from: fixed at build time, or derived from
/// the branch state just before matching.
pub(crate) enum PatternSource<S> {
    Fixed(Pattern),
    FromState(Box<dyn Fn(&S) -> Pattern>),
}

/// Where a literal's suggestions come from on a failed match. The function
/// form receives the branch state and the original *full* input, not the
/// remainder the literal was matched against.
pub(crate) enum SuggestionSource<S> {
    Fixed(Vec<Suggestion>),
    FromState(Box<dyn Fn(&S, &str) -> Vec<Suggestion>>),
}

pub(crate) type StateUpdater<S> = Box<dyn Fn(&mut S, &Captures<'_>)>;

/// Generator behind a dynamic node. Runs fresh for every (branch, node) pair.
pub(crate) type Generator<S> = Box<dyn Fn(&S, &Matched) -> Expression<S>>;

pub(crate) struct LiteralNode<S> {
    pub pattern: PatternSource<S>,
    pub suggestions: SuggestionSource<S>,
    pub updater: Option<StateUpdater<S>>,
}

pub(crate) enum ExprKind<S> {
    Literal(LiteralNode<S>),
    Sequence(Vec<Expression<S>>),
    Union(Vec<Expression<S>>),
    Dynamic(Generator<S>),
}

/// A node in an expression graph, generic over the caller's state type `S`.
pub struct Expression<S> {
    pub(crate) kind: Rc<ExprKind<S>>,
    pub(crate) id: Option<NodeId>,
}

impl<S> Clone for Expression<S> {
    fn clone(&self) -> Self {
        Expression { kind: Rc::clone(&self.kind), id: self.id.clone() }
    }
}

impl<S> std::fmt::Debug for Expression<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &*self.kind {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Sequence(_) => "Sequence",
            ExprKind::Union(_) => "Union",
            ExprKind::Dynamic(_) => "Dynamic",
        };
        f.debug_struct("Expression").field("kind", &kind).field("id", &self.id).finish()
    }
}

impl<S> Expression<S> {
    /// Attach an explicit node id.
    ///
    /// Explicit ids survive dynamic regeneration, which is what lets a
    /// generator ask "was this node already matched on this branch". The id
    /// `"<root>"` is reserved for the engine's synthetic root.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn from_kind(kind: ExprKind<S>) -> Self {
        Expression { kind: Rc::new(kind), id: None }
    }
}

/// Builder for a literal expression. Convert with `.build()` or let the
/// `Into<Expression>` conversion do it at the use site.
pub struct Literal<S> {
    pattern: PatternSource<S>,
    suggestions: SuggestionSource<S>,
    updater: Option<StateUpdater<S>>,
    id: Option<NodeId>,
}

/// Start a literal from a fixed pattern.
pub fn literal<S>(pattern: Pattern) -> Literal<S> {
    Literal {
        pattern: PatternSource::Fixed(pattern),
        suggestions: SuggestionSource::Fixed(Vec::new()),
        updater: None,
        id: None,
    }
}

/// Start a literal whose pattern is derived from the branch state at match
/// time.
pub fn literal_with<S: 'static>(pattern: impl Fn(&S) -> Pattern + 'static) -> Literal<S> {
    Literal {
        pattern: PatternSource::FromState(Box::new(pattern)),
        suggestions: SuggestionSource::Fixed(Vec::new()),
        updater: None,
        id: None,
    }
}

impl<S> Literal<S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Fixed suggestions offered when this literal fails to match.
    pub fn suggest<I>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Suggestion>,
    {
        self.suggestions = SuggestionSource::Fixed(suggestions.into_iter().map(Into::into).collect());
        self
    }

    /// Suggestions computed from the branch state and the original full input.
    pub fn suggest_with(mut self, suggestions: impl Fn(&S, &str) -> Vec<Suggestion> + 'static) -> Self
    where
        S: 'static,
    {
        self.suggestions = SuggestionSource::FromState(Box::new(suggestions));
        self
    }

    /// State updater applied on a successful match. The updater receives a
    /// private draft of the branch state plus the capture groups; the draft is
    /// frozen the moment the updater returns.
    pub fn update(mut self, updater: impl Fn(&mut S, &Captures<'_>) + 'static) -> Self
    where
        S: 'static,
    {
        self.updater = Some(Box::new(updater));
        self
    }

    pub fn build(self) -> Expression<S> {
        let node = LiteralNode { pattern: self.pattern, suggestions: self.suggestions, updater: self.updater };
        Expression { kind: Rc::new(ExprKind::Literal(node)), id: self.id }
    }
}

impl<S> From<Literal<S>> for Expression<S> {
    fn from(builder: Literal<S>) -> Self {
        builder.build()
    }
}

/// Children matched in order. Fails with a configuration error when `children`
/// is empty; the `seq!` macro enforces non-emptiness at the call site instead.
pub fn sequence<S>(children: Vec<Expression<S>>) -> Result<Expression<S>, GrammarError> {
    if children.is_empty() {
        return Err(GrammarError::EmptySequence);
    }
    Ok(seq_unchecked(children))
}

/// Alternates matched independently from the same position. Fails with a
/// configuration error when `alternates` is empty; see `one_of!`.
pub fn union<S>(alternates: Vec<Expression<S>>) -> Result<Expression<S>, GrammarError> {
    if alternates.is_empty() {
        return Err(GrammarError::EmptyUnion);
    }
    Ok(union_unchecked(alternates))
}

/// A node that generates its concrete child expression at evaluation time.
///
/// The generator sees the branch state and a [`Matched`] query over the node
/// ids this branch has matched so far. It runs fresh for every branch that
/// reaches it; the engine never caches its output.
pub fn dynamic<S: 'static>(generate: impl Fn(&S, &Matched) -> Expression<S> + 'static) -> Expression<S> {
    Expression::from_kind(ExprKind::Dynamic(Box::new(generate)))
}

#[doc(hidden)]
pub fn seq_unchecked<S>(children: Vec<Expression<S>>) -> Expression<S> {
    Expression::from_kind(ExprKind::Sequence(children))
}

#[doc(hidden)]
pub fn union_unchecked<S>(alternates: Vec<Expression<S>>) -> Expression<S> {
    Expression::from_kind(ExprKind::Union(alternates))
}
