//! Grammar construction: the expression graph and its combinators.
//!
//! This module is the layer callers use to describe *what* an input should
//! look like; the evaluation of a grammar against concrete input lives in
//! `crate::engine`.
//!
//! ## How the parts work together
//!
//! ```text
//! literal / sequence / union / dynamic     (expr.rs, the four primitives)
//!                  │
//!                  ▼
//! optional / conditional / repeated / permutations
//!                  │                       (combinators.rs, derived shapes
//!                  │                        built purely from the primitives)
//!                  ▼
//!          Expression<S> graph  ──▶  engine::Evaluator
//! ```
//!
//! Suggestions (`suggestion.rs`) are configuration carried by literals and
//! surfaced by the engine on the non-matching path.
//!
//! ## Responsibilities by module
//!
//! - `expr.rs`: the `Expression` data model, literal builder, fallible
//!   `sequence`/`union` constructors, `dynamic`.
//! - `combinators.rs`: `match_empty`, `optional`, `conditional` (+
//!   `Fallback`), `repeated`, and the recursive epoch construction behind
//!   `permutations`.
//! - `suggestion.rs`: the `Suggestion` / `SuggestionGroup` value types.

#[path = "grammar/combinators.rs"]
mod combinators;
#[path = "grammar/expr.rs"]
mod expr;
#[path = "grammar/suggestion.rs"]
mod suggestion;

pub use combinators::{
    conditional, match_empty, optional, permutations, permutations_with_id, repeated, Fallback,
};
pub use expr::{dynamic, literal, literal_with, sequence, union, Expression, Literal};
pub use suggestion::{Suggestion, SuggestionGroup};

#[doc(hidden)]
pub use expr::{seq_unchecked, union_unchecked};

pub(crate) use expr::{ExprKind, LiteralNode, PatternSource, SuggestionSource};
