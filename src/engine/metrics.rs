//! Evaluation run metrics.
//!
//! Opt-in observability for grammar authors: `parse` stays allocation-light,
//! while `parse_verbose` additionally reports how much work the evaluator did.
//! The counters are cheap to maintain (plain integers bumped on the hot path)
//! and are primarily useful for spotting grammars with pathological fan-out,
//! permutation groups whose member patterns overlap, or dynamic generators
//! that fire far more often than expected.

use std::time::Duration;

/// Work counters and timing for one evaluation.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the parse call.
    pub total: Duration,
    /// Graph nodes evaluated, counting every (node, branch) pair.
    pub nodes_evaluated: usize,
    /// Literal pattern executions attempted.
    pub literal_attempts: usize,
    /// Dynamic generator invocations (each one materialized a fresh fragment).
    pub generator_calls: usize,
    /// Terminal steps reachable under the root result.
    pub terminals: usize,
    /// Byte length of the longest matched prefix.
    pub longest_len: usize,
}
