//! The regular-expression collaborator interface.
//!
//! The engine treats the regex implementation as a black box with a narrow
//! contract: compile a source pattern with flags, execute it against a string,
//! and report the matched length plus capture groups. This module is the only
//! place that contract is spelled out; everything else handles `Pattern` and
//! `Captures` values without knowing what sits behind them.
//!
//! ## Anchoring
//!
//! Literal matching is always relative to the current branch position, so every
//! pattern is executed in a *left-anchored* compiled form:
//!
//! ```text
//! source "foo|bar"  ->  compiled "^(?:foo|bar)"
//! source "^foo"     ->  compiled "^foo"          (anchor already present)
//! source ""         ->  compiled "^"             (vacuous empty match)
//! ```
//!
//! The non-capturing wrapper keeps user capture-group indices stable. The
//! original source stays available via [`Pattern::source`] so dynamic pattern
//! generators can compose from it.

use crate::error::GrammarError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

bitflags::bitflags! {
    /// Pattern modifiers, mapped onto the underlying regex builder.
    ///
    /// These survive anchoring untouched: forcing the left anchor never changes
    /// the flags a pattern was configured with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternFlags: u8 {
        const CASE_INSENSITIVE    = 1 << 0;
        const MULTI_LINE          = 1 << 1;
        const DOT_MATCHES_NEWLINE = 1 << 2;
        const SWAP_GREED          = 1 << 3;
    }
}

/// Pattern that vacuously matches the empty string at any position.
static EMPTY: Lazy<Pattern> = Lazy::new(|| Pattern::new("", PatternFlags::empty()).unwrap());

/// Pattern that can never match anything, empty input included.
static NEVER: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"[^\s\S]", PatternFlags::empty()).unwrap());

/// A compiled literal pattern.
///
/// Cheap to clone: the compiled regex is internally shared.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
    anchored: Regex,
}

impl Pattern {
    /// Compile `source` with `flags`, forcing a left anchor.
    pub fn new(source: &str, flags: PatternFlags) -> Result<Self, GrammarError> {
        let anchored_source = if source.is_empty() {
            "^".to_string()
        } else if source.starts_with('^') {
            source.to_string()
        } else {
            format!("^(?:{source})")
        };

        let anchored = RegexBuilder::new(&anchored_source)
            .case_insensitive(flags.contains(PatternFlags::CASE_INSENSITIVE))
            .multi_line(flags.contains(PatternFlags::MULTI_LINE))
            .dot_matches_new_line(flags.contains(PatternFlags::DOT_MATCHES_NEWLINE))
            .swap_greed(flags.contains(PatternFlags::SWAP_GREED))
            .build()?;

        Ok(Pattern { source: source.to_string(), flags, anchored })
    }

    /// The pattern matching only the empty string.
    pub fn empty() -> Self {
        (*EMPTY).clone()
    }

    /// The pattern matching nothing at all.
    pub fn never() -> Self {
        (*NEVER).clone()
    }

    /// Original (un-anchored) pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Flags this pattern was compiled with.
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Execute against the start of `text`.
    ///
    /// Returns the matched prefix length and the capture groups, or `None`
    /// when the pattern does not match at position zero.
    pub(crate) fn execute<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        let caps = self.anchored.captures(text)?;
        let whole = caps.get(0).unwrap();
        let groups = (0..caps.len()).map(|i| caps.get(i).map(|m| m.as_str())).collect();
        Some(PatternMatch { matched_len: whole.end(), captures: Captures { groups } })
    }
}

/// A successful anchored execution: consumed prefix length plus captures.
#[derive(Debug)]
pub(crate) struct PatternMatch<'t> {
    pub matched_len: usize,
    pub captures: Captures<'t>,
}

/// Capture groups from one pattern execution.
///
/// Group 0 is the whole match. An optional group that did not participate in
/// the match is *absent* (`None`), which is distinct from a participating
/// group that matched the empty string (`Some("")`). State updaters rely on
/// that distinction.
#[derive(Debug)]
pub struct Captures<'t> {
    groups: Vec<Option<&'t str>>,
}

impl<'t> Captures<'t> {
    /// Text of group `i`, or `None` when the group did not participate.
    pub fn get(&self, i: usize) -> Option<&'t str> {
        self.groups.get(i).copied().flatten()
    }

    /// The whole matched text (group 0).
    pub fn whole(&self) -> &'t str {
        self.get(0).unwrap_or("")
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
