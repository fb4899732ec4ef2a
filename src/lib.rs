//! promptling: an expression-graph matching engine for interactive command
//! entry.
//!
//! A grammar is a graph of composable expression nodes: regex-backed
//! literals, sequences, unions, and dynamic nodes that generate their
//! children at evaluation time. Matching an input against a grammar does two
//! things at once:
//!
//! - extracts typed state from the matched portion (each literal can fold its
//!   capture groups into the caller's state type), and
//! - produces ranked, deduplicated suggestions for extending an input that
//!   stops matching partway.
//!
//! ```
//! use promptling::{literal, one_of, parse, pattern, seq};
//!
//! #[derive(Clone, Default, Debug, PartialEq)]
//! struct Cmd { action: Option<String> }
//!
//! let grammar = seq![
//!     one_of![
//!         literal(pattern!("deploy"))
//!             .suggest(["deploy"])
//!             .update(|cmd: &mut Cmd, _| cmd.action = Some("deploy".into())),
//!         literal(pattern!("rollback"))
//!             .suggest(["rollback"])
//!             .update(|cmd: &mut Cmd, _| cmd.action = Some("rollback".into())),
//!     ],
//!     literal(pattern!(" +")),
//! ];
//!
//! let out = parse(&grammar, Cmd::default(), "dep");
//! assert_eq!(out.matching_part, "");
//! assert_eq!(out.suggestions.len(), 2);
//!
//! let out = parse(&grammar, Cmd::default(), "deploy ");
//! assert_eq!(out.state.action.as_deref(), Some("deploy"));
//! ```
//!
//! Evaluation is single-threaded, synchronous, and purely functional over
//! immutable inputs: every parse call builds its result structures from
//! scratch and never mutates the grammar it was given.

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod grammar;

pub use api::{parse, parse_verbose, ParseResult, ParseResultVerbose};
pub use engine::{Captures, Matched, Pattern, PatternFlags, RunMetrics};
pub use error::GrammarError;
pub use grammar::{
    conditional, dynamic, literal, literal_with, match_empty, optional, permutations,
    permutations_with_id, repeated, sequence, union, Expression, Fallback, Literal, Suggestion,
    SuggestionGroup,
};

#[doc(hidden)]
pub use grammar::{seq_unchecked as __seq_unchecked, union_unchecked as __union_unchecked};

/// Identifier of a node in an expression graph.
///
/// Explicit ids (via [`Expression::with_id`] or [`Literal::id`]) are stable
/// across branches and dynamic regeneration; nodes without one get a
/// positional id (`"{parent}.{ordinal}"`) assigned during evaluation. Ids are
/// only meaningful within a single parse call.
pub type NodeId = String;

/// Reserved id of the engine's synthetic root node.
pub(crate) const ROOT_ID: &str = "<root>";
