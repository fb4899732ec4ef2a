//! Grammar configuration errors.
//!
//! Everything in this module is a *programmer* error in grammar construction:
//! builders raise these eagerly, before any input is ever parsed, and callers
//! are expected to propagate them with `?` rather than handle them.
//!
//! A literal failing to match input is never an error. That is a normal,
//! fully-typed outcome carried on the result chain (see `engine::results`).

use thiserror::Error;

/// Errors raised while building an expression graph.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A `sequence` was built with zero children.
    #[error("sequence requires at least one child")]
    EmptySequence,

    /// A `union` was built with zero alternates.
    #[error("union requires at least one alternate")]
    EmptyUnion,

    /// A `repeated` combinator was given an upper bound below its lower bound.
    #[error("repeated bounds are invalid: max {max} is below min {min}")]
    RepeatBounds { min: usize, max: usize },

    /// A pattern source failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
