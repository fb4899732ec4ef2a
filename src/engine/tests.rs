use crate::engine::pattern::{Pattern, PatternFlags};
use crate::grammar::{
    conditional, literal, literal_with, optional, permutations, permutations_with_id, repeated,
    Expression, Fallback, Suggestion,
};
use crate::{dynamic, parse, parse_verbose, Matched};

/// State used across these tests: an append-only log of what matched.
#[derive(Clone, Debug, Default, PartialEq)]
struct Log {
    seen: Vec<String>,
}

/// A literal matching `word` that logs its own match.
fn member(word: &'static str) -> Expression<Log> {
    literal(Pattern::new(word, PatternFlags::empty()).unwrap())
        .suggest([word])
        .update(|log: &mut Log, caps| log.seen.push(caps.whole().to_string()))
        .build()
}

fn labels(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.label.as_str()).collect()
}

#[test]
fn sequence_stops_at_first_miss_and_surfaces_its_suggestions() {
    let grammar = seq![
        literal::<()>(pattern!("foo")),
        literal(pattern!("bar")).suggest(["bar"]),
    ];
    let out = parse(&grammar, (), "fooba");

    assert_eq!(out.matching_part, "foo");
    assert_eq!(out.remainder, "ba");
    assert_eq!(labels(&out.suggestions), ["bar"]);
}

#[test]
fn union_longest_alternate_wins() {
    let grammar = one_of![
        literal::<()>(pattern!("foo")),
        literal(pattern!("foobar")),
    ];
    let out = parse(&grammar, (), "foobarbaz");

    assert_eq!(out.matching_part, "foobar");
    assert_eq!(out.remainder, "baz");
    assert!(out.suggestions.is_empty());
}

#[test]
fn longest_match_selection_is_global() {
    // The deep branch reaches further than the shallow one-literal alternate.
    let grammar = one_of![
        seq![literal::<()>(pattern!("foo")), literal(pattern!("bar"))],
        literal(pattern!("foobarbaz")),
    ];
    let out = parse(&grammar, (), "foobarba");

    assert_eq!(out.matching_part, "foobar");
    assert_eq!(out.remainder, "ba");
}

#[test]
fn suggestions_come_only_from_the_longest_branches() {
    let grammar = one_of![
        literal::<()>(pattern!("foo")).suggest(["foo"]),
        seq![literal(pattern!("f")), literal(pattern!("x")).suggest(["x"])],
    ];
    let out = parse(&grammar, (), "f");

    // The one-literal alternate failed at offset 0; the sequence got to
    // offset 1 before failing. Only the further branch contributes.
    assert_eq!(out.matching_part, "f");
    assert_eq!(labels(&out.suggestions), ["x"]);
}

#[test]
fn matched_literal_contributes_no_suggestions() {
    let grammar = literal::<()>(pattern!("foo")).suggest(["foo"]).build();
    let out = parse(&grammar, (), "foo rest");

    assert_eq!(out.matching_part, "foo");
    assert_eq!(out.remainder, " rest");
    assert!(out.suggestions.is_empty());
}

#[test]
fn miss_leaves_state_untouched() {
    let grammar = seq![member("a"), member("b")];
    let out = parse(&grammar, Log::default(), "ax");

    assert_eq!(out.matching_part, "a");
    assert_eq!(out.state.seen, ["a"]);
}

#[test]
fn updater_distinguishes_absent_from_empty_captures() {
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Caps {
        first: Option<Option<String>>,
        second: Option<String>,
    }

    let grammar = literal::<Caps>(pattern!("set(x)?(y)"))
        .update(|state, caps| {
            state.first = Some(caps.get(1).map(str::to_string));
            state.second = caps.get(2).map(str::to_string);
        })
        .build();

    let out = parse(&grammar, Caps::default(), "sety");
    assert_eq!(out.matching_part, "sety");
    assert_eq!(out.state.first, Some(None));
    assert_eq!(out.state.second.as_deref(), Some("y"));
}

#[test]
fn suggestion_functions_see_the_full_input() {
    let grammar = seq![
        literal::<()>(pattern!("foo")),
        literal(pattern!("bar"))
            .suggest_with(|_, full| vec![Suggestion::new(format!("full:{full}"))]),
    ];
    let out = parse(&grammar, (), "fooX");

    assert_eq!(labels(&out.suggestions), ["full:fooX"]);
}

#[test]
fn pattern_can_depend_on_branch_state() {
    #[derive(Clone, Debug, Default)]
    struct Count {
        n: usize,
    }

    let grammar = seq![
        literal::<Count>(pattern!("(a+)"))
            .update(|state, caps| state.n = caps.get(1).map_or(0, str::len)),
        literal_with(|state: &Count| {
            Pattern::new(&format!("b{{{}}}", state.n), PatternFlags::empty()).unwrap()
        }),
    ];

    let out = parse(&grammar, Count::default(), "aabb");
    assert_eq!(out.matching_part, "aabb");
    assert_eq!(out.remainder, "");

    let out = parse(&grammar, Count::default(), "aab");
    assert_eq!(out.matching_part, "aa");
    assert_eq!(out.remainder, "b");
}

#[test]
fn merge_tie_breaks_apply_across_branches() {
    let grammar = one_of![
        literal::<()>(pattern!("aaa")).suggest([Suggestion::new("x").group("weak", 1)]),
        literal(pattern!("bbb")).suggest([Suggestion::new("x").group("strong", 2)]),
    ];
    let out = parse(&grammar, (), "zzz");

    assert_eq!(out.suggestions.len(), 1);
    assert_eq!(out.suggestions[0].group.as_ref().unwrap().key, "strong");
}

// --- optional --------------------------------------------------------------

#[test]
fn optional_never_matches_less_than_its_inner_expression() {
    let inner: Expression<()> = literal(pattern!("ab")).suggest(["ab"]).build();
    for input in ["ab", "abab", "x", ""] {
        let plain = parse(&inner, (), input);
        let opt = parse(&optional(inner.clone()), (), input);
        assert!(
            opt.matching_part.len() >= plain.matching_part.len(),
            "optional matched less than inner on {input:?}"
        );
    }
}

#[test]
fn optional_miss_still_offers_the_inner_suggestions() {
    let grammar = optional(literal::<()>(pattern!("ab")).suggest(["ab"]));
    let out = parse(&grammar, (), "x");

    // The skip branch matched vacuously, so nothing was consumed, but the
    // attempt branch still contributes its suggestions at the same offset.
    assert_eq!(out.matching_part, "");
    assert_eq!(labels(&out.suggestions), ["ab"]);
}

// --- conditional -----------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
struct Flag {
    on: bool,
}

#[test]
fn conditional_picks_the_true_branch() {
    let grammar = conditional(|f: &Flag| f.on, literal(pattern!("yes")), Fallback::MatchEmpty);
    let out = parse(&grammar, Flag { on: true }, "yes");
    assert_eq!(out.matching_part, "yes");
}

#[test]
fn conditional_match_empty_fallback_continues_the_sequence() {
    let grammar = seq![
        literal::<Flag>(pattern!("foo")),
        conditional(|f: &Flag| f.on, literal(pattern!("bar")), Fallback::MatchEmpty),
        literal(pattern!("!")).suggest(["bang"]),
    ];
    let out = parse(&grammar, Flag { on: false }, "foo");

    assert_eq!(out.matching_part, "foo");
    assert_eq!(labels(&out.suggestions), ["bang"]);
}

#[test]
fn conditional_reject_fails_even_at_end_of_input() {
    let grammar = seq![
        literal::<Flag>(pattern!("foo")),
        conditional(|f: &Flag| f.on, literal(pattern!("bar")), Fallback::Reject),
        literal(pattern!("!")).suggest(["bang"]),
    ];
    let out = parse(&grammar, Flag { on: false }, "foo");

    // With the input exhausted a zero-length end-anchored literal would have
    // matched; reject must not, so the trailing literal is never reached.
    assert_eq!(out.matching_part, "foo");
    assert!(out.suggestions.is_empty());
}

#[test]
fn conditional_expr_fallback_is_evaluated() {
    let grammar = conditional(
        |f: &Flag| f.on,
        literal(pattern!("yes")),
        Fallback::Expr(literal(pattern!("no")).build()),
    );
    let out = parse(&grammar, Flag { on: false }, "no");
    assert_eq!(out.matching_part, "no");
}

// --- repeated --------------------------------------------------------------

#[test]
fn repeated_bounds_table() {
    // (min, max, input, expected matching part, expected remainder)
    let cases: Vec<(usize, Option<usize>, &str, &str, &str)> = vec![
        (0, None, "", "", ""),
        (0, None, "x", "", "x"),
        (0, None, "ababx", "abab", "x"),
        (1, None, "ababab", "ababab", ""),
        (1, Some(2), "ababab", "abab", "ab"),
        (2, Some(2), "abab", "abab", ""),
        (0, Some(0), "ab", "", "ab"),
    ];

    for (min, max, input, matching, remainder) in cases {
        let grammar = repeated(literal::<()>(pattern!("ab")), min, max).unwrap();
        let out = parse(&grammar, (), input);
        assert_eq!(out.matching_part, matching, "min={min} max={max:?} input={input:?}");
        assert_eq!(out.remainder, remainder, "min={min} max={max:?} input={input:?}");
    }
}

#[test]
fn repeated_below_min_still_reports_the_partial_match() {
    let grammar = repeated(member("ab"), 3, None).unwrap();
    let out = parse(&grammar, Log::default(), "abab");

    assert_eq!(out.matching_part, "abab");
    assert_eq!(out.state.seen, ["ab", "ab"]);
    // The unmet third occurrence is what the suggestions describe.
    assert_eq!(labels(&out.suggestions), ["ab"]);
}

// --- dynamic ---------------------------------------------------------------

#[test]
fn dynamic_generator_branches_on_already_matched_ids() {
    let grammar = seq![
        optional(
            literal::<Log>(pattern!("test"))
                .id("test")
                .suggest(["test"])
                .update(|log, _| log.seen.push("test".into()))
        ),
        dynamic(|_state: &Log, matched: &Matched| {
            if matched.was_matched("test") {
                literal(pattern!("foo")).suggest(["foo after test"]).build()
            } else {
                literal(pattern!("foo")).suggest(["plain foo"]).build()
            }
        }),
    ];

    // The branch that consumed "test" is the one that completes.
    let out = parse(&grammar, Log::default(), "testfoo");
    assert_eq!(out.matching_part, "testfoo");
    assert_eq!(out.state.seen, ["test"]);
    assert!(out.suggestions.is_empty());

    // Without "test" in the input the skip branch completes instead.
    let out = parse(&grammar, Log::default(), "foo");
    assert_eq!(out.matching_part, "foo");
    assert!(out.state.seen.is_empty());

    // When nothing matches at all, both branches' suggestions merge.
    let out = parse(&grammar, Log::default(), "");
    assert_eq!(out.matching_part, "");
    let mut seen = labels(&out.suggestions);
    seen.sort_unstable();
    assert_eq!(seen, ["plain foo", "test"]);
}

// --- permutations ----------------------------------------------------------

#[test]
fn permutations_accept_every_ordering() {
    let orderings: [[&str; 3]; 6] = [
        ["foo", "bar", "baz"],
        ["foo", "baz", "bar"],
        ["bar", "foo", "baz"],
        ["bar", "baz", "foo"],
        ["baz", "foo", "bar"],
        ["baz", "bar", "foo"],
    ];

    for ordering in orderings {
        let grammar = permutations(vec![member("foo"), member("bar"), member("baz")], Vec::new());
        let input: String = ordering.concat();
        let out = parse(&grammar, Log::default(), &input);

        assert_eq!(out.matching_part, input, "ordering {ordering:?}");
        assert_eq!(out.remainder, "", "ordering {ordering:?}");
        assert_eq!(out.state.seen, ordering, "ordering {ordering:?}");
    }
}

#[test]
fn permutations_state_reflects_input_order() {
    let grammar = permutations(vec![member("foo"), member("bar")], Vec::new());
    let out = parse(&grammar, Log::default(), "barfooX");

    assert_eq!(out.matching_part, "barfoo");
    assert_eq!(out.remainder, "X");
    assert_eq!(out.state.seen, ["bar", "foo"]);
}

#[test]
fn permutations_do_not_reuse_a_consumed_member() {
    let grammar = permutations(vec![member("foo"), member("bar")], Vec::new());
    let out = parse(&grammar, Log::default(), "foofoo");

    assert_eq!(out.matching_part, "foo");
    assert_eq!(out.remainder, "foo");
    assert_eq!(out.state.seen, ["foo"]);
    // Only the unconsumed member is still on offer.
    assert_eq!(labels(&out.suggestions), ["bar"]);
}

#[test]
fn permutations_with_only_optional_members_can_stop() {
    let grammar = permutations_with_id(
        vec![member("foo")],
        vec![member("bar")],
        "cmd",
    );

    let out = parse(&grammar, Log::default(), "foo");
    assert_eq!(out.matching_part, "foo");
    assert_eq!(out.remainder, "");

    let out = parse(&grammar, Log::default(), "barfoo");
    assert_eq!(out.state.seen, ["bar", "foo"]);

    // A required member outstanding keeps the permutation unfinished.
    let out = parse(&grammar, Log::default(), "bar");
    assert_eq!(out.matching_part, "bar");
    assert_eq!(labels(&out.suggestions), ["foo"]);
}

#[test]
fn permutations_prune_dead_orderings_early() {
    let grammar = permutations(
        vec![member("alpha"), member("beta"), member("gamma")],
        Vec::new(),
    );
    let out = parse_verbose(&grammar, Log::default(), "betagammaalpha");

    assert_eq!(out.result.matching_part, "betagammaalpha");
    // Non-overlapping member patterns: one epoch per consumed member, each
    // fanning out only over the remaining members, far below the 3! * 3
    // node count a full enumeration would cost.
    assert!(
        out.metrics.literal_attempts < 30,
        "expected early pruning, got {} literal attempts",
        out.metrics.literal_attempts
    );
}
