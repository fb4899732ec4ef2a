//! Matching engine.
//!
//! This module is the operational half of the crate: it takes an expression
//! graph built with `crate::grammar` and evaluates it against one input
//! string.
//!
//! ## How the parts work together
//!
//! At a high level, one parse call is a pipeline:
//!
//! ```text
//! grammar (Expression graph)
//!        │
//! input ─┼─▶ Evaluator::run          (evaluator.rs)
//!        │     - literal: anchored pattern execution  (pattern.rs)
//!        │     - sequence/union: branch fan-out
//!        │     - dynamic: matched-set query            (matched.rs)
//!        │                + fresh fragment generation
//!        │     - every outcome recorded on the
//!        │       step chain / result arena             (results.rs)
//!        ▼
//! root NodeResult
//!        │  longest-match subset + best step           (results.rs views)
//!        │  suggestion merge                           (merge.rs)
//!        ▼
//!   ParseResult
//! ```
//!
//! ## Responsibilities by module
//!
//! - `pattern.rs`: the regex collaborator boundary (compile, anchor, execute,
//!   capture groups).
//! - `results.rs`: the step chain and the node-result arena with its derived
//!   views.
//! - `matched.rs`: derives "what has this branch already matched" for dynamic
//!   nodes.
//! - `evaluator.rs`: the recursive evaluation itself.
//! - `merge.rs`: label-keyed suggestion deduplication with the group/priority
//!   tie-break.
//! - `metrics.rs`: opt-in work counters for `parse_verbose`.
//!
//! ## Debugging
//!
//! Set `PROMPTLING_DEBUG_EVAL=1` to print per-node evaluation traces.

#[path = "engine/evaluator.rs"]
mod evaluator;
#[path = "engine/matched.rs"]
pub(crate) mod matched;
#[path = "engine/merge.rs"]
mod merge;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pattern.rs"]
pub(crate) mod pattern;
#[path = "engine/results.rs"]
pub(crate) mod results;

pub use matched::Matched;
pub use metrics::RunMetrics;
pub use pattern::{Captures, Pattern, PatternFlags};

pub(crate) use evaluator::Evaluator;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;
