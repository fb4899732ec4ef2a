use std::time::Instant;

use crate::engine::{Evaluator, RunMetrics};
use crate::grammar::{Expression, Suggestion};

/// Result of matching one input against one grammar.
///
/// `matching_part` + `remainder` always reassemble the original input; the
/// split point is the globally longest prefix any branch of the grammar could
/// consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<S> {
    /// The longest prefix of the input that matched.
    pub matching_part: String,
    /// Everything after the matched prefix.
    pub remainder: String,
    /// Aggregate state extracted along the best branch.
    pub state: S,
    /// Merged, deduplicated suggestions for extending the input, drawn from
    /// every branch that reached the longest position.
    pub suggestions: Vec<Suggestion>,
}

impl<S> ParseResult<S> {
    /// True when the whole input was consumed by a matching branch.
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Result from [`parse_verbose`]: the parse outcome plus work counters.
#[derive(Debug, Clone)]
pub struct ParseResultVerbose<S> {
    pub result: ParseResult<S>,
    pub metrics: RunMetrics,
}

/// Match `input` against `expression`, starting from `initial` state.
///
/// # Example
/// ```
/// use promptling::{literal, pattern, parse, seq};
///
/// let grammar = seq![
///     literal::<()>(pattern!("foo")),
///     literal(pattern!("bar")).suggest(["bar"]),
/// ];
/// let out = parse(&grammar, (), "fooba");
/// assert_eq!(out.matching_part, "foo");
/// assert_eq!(out.remainder, "ba");
/// assert_eq!(out.suggestions[0].label, "bar");
/// ```
pub fn parse<S: Clone>(expression: &Expression<S>, initial: S, input: &str) -> ParseResult<S> {
    parse_verbose(expression, initial, input).result
}

/// [`parse`] with evaluation metrics attached.
///
/// Useful for profiling a grammar: permutation groups with overlapping member
/// patterns and over-eager dynamic generators show up directly in the
/// counters. The default [`parse`] path does not pay for the extra bookkeeping
/// beyond a few integer bumps.
pub fn parse_verbose<S: Clone>(expression: &Expression<S>, initial: S, input: &str) -> ParseResultVerbose<S> {
    let start = Instant::now();

    let mut evaluator = Evaluator::new(input);
    let root = evaluator.run(expression, initial);

    let arena = &evaluator.arena;
    let best = arena.best(root);
    let suggestions = arena.suggestions(root).to_vec();

    let result = ParseResult {
        matching_part: input[..best.match_end].to_string(),
        remainder: input[best.match_end..].to_string(),
        state: (*best.state).clone(),
        suggestions,
    };

    let mut metrics = evaluator.metrics.clone();
    metrics.total = start.elapsed();

    ParseResultVerbose { result, metrics }
}
