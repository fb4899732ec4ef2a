//! Suggestion merging.
//!
//! Several branches can fail at the same furthest position, each contributing
//! its own suggestions; merging collapses them into one list keyed by label.
//! When two suggestions compete for a label, the winner is decided by a total
//! order:
//!
//! 1. a grouped suggestion outranks an ungrouped one;
//! 2. same group key (or both ungrouped): higher suggestion priority wins;
//! 3. different groups: higher *group* priority wins;
//! 4. otherwise the first one encountered stays.
//!
//! The fold is pure (no state outlives the call) and the output preserves the
//! order in which labels were first seen, which keeps the merged list stable
//! for a fixed branch-exploration order.

use std::collections::HashMap;

use crate::grammar::Suggestion;

/// Merge `candidates` into a deduplicated list, first-seen label order.
pub(crate) fn merge<'a>(candidates: impl IntoIterator<Item = &'a Suggestion>) -> Vec<Suggestion> {
    let mut merged: Vec<Suggestion> = Vec::new();
    let mut slot_by_label: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        match slot_by_label.get(&candidate.label) {
            None => {
                slot_by_label.insert(candidate.label.clone(), merged.len());
                merged.push(candidate.clone());
            }
            Some(&slot) => {
                if outranks(candidate, &merged[slot]) {
                    merged[slot] = candidate.clone();
                }
            }
        }
    }

    merged
}

/// True when `challenger` strictly outranks `incumbent` for the same label.
fn outranks(challenger: &Suggestion, incumbent: &Suggestion) -> bool {
    match (&challenger.group, &incumbent.group) {
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => challenger.priority > incumbent.priority,
        (Some(a), Some(b)) if a.key == b.key => challenger.priority > incumbent.priority,
        (Some(a), Some(b)) => a.priority > b.priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(merged: &[Suggestion]) -> Vec<&str> {
        merged.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let a = Suggestion::new("alpha");
        let b = Suggestion::new("beta");
        let a2 = Suggestion::new("alpha");
        let merged = merge([&a, &b, &a2]);
        assert_eq!(labels(&merged), ["alpha", "beta"]);
    }

    #[test]
    fn grouped_outranks_ungrouped() {
        let plain = Suggestion::new("x").priority(99);
        let grouped = Suggestion::new("x").group("commands", -5);
        let merged = merge([&plain, &grouped]);
        assert_eq!(merged[0].group.as_ref().unwrap().key, "commands");

        // And the other way round: the grouped incumbent stays.
        let merged = merge([&grouped, &plain]);
        assert_eq!(merged[0].group.as_ref().unwrap().key, "commands");
    }

    #[test]
    fn same_group_compares_suggestion_priority() {
        let low = Suggestion::new("x").group("g", 0).priority(1);
        let high = Suggestion::new("x").group("g", 0).priority(2);
        let merged = merge([&low, &high]);
        assert_eq!(merged[0].priority, 2);
    }

    #[test]
    fn different_groups_compare_group_priority() {
        let weak = Suggestion::new("x").group("weak", 1).priority(100);
        let strong = Suggestion::new("x").group("strong", 2).priority(-100);
        let merged = merge([&weak, &strong]);
        assert_eq!(merged[0].group.as_ref().unwrap().key, "strong");
    }

    #[test]
    fn exact_ties_keep_the_first() {
        let first = Suggestion::new("x").value("first");
        let second = Suggestion::new("x").value("second");
        let merged = merge([&first, &second]);
        assert_eq!(merged[0].value.as_deref(), Some("first"));
    }

    #[test]
    fn merge_is_idempotent() {
        let a = Suggestion::new("a").group("g", 1);
        let b = Suggestion::new("b").priority(3);
        let c = Suggestion::new("a").priority(9);
        let once = merge([&a, &b, &c]);
        let twice = merge(once.iter());
        assert_eq!(once, twice);
    }

    #[test]
    fn winner_is_permutation_independent() {
        let contenders = [
            Suggestion::new("x"),
            Suggestion::new("x").group("g", 1),
            Suggestion::new("x").group("g", 1).priority(5),
            Suggestion::new("x").group("h", 9),
        ];
        let forward = merge(contenders.iter());
        let reversed = merge(contenders.iter().rev());
        assert_eq!(forward[0].group, reversed[0].group);
        assert_eq!(forward[0].priority, reversed[0].priority);
    }
}
