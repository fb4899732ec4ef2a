//! Suggestion values attached to literals.
//!
//! A suggestion describes one way to extend an input that stopped matching.
//! Literals carry them as configuration; the engine surfaces them only on the
//! non-matching result path, and `engine::merge` deduplicates them across
//! branches using the group/priority order encoded here.
//!
//! The bare-string form from hosts ("just a label") is the `From<&str>` /
//! `From<String>` conversion; everything downstream works on the full struct.

use serde::{Deserialize, Serialize};

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display label. Also the deduplication key during merging.
    pub label: String,
    /// Text to insert when the suggestion is accepted; defaults to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Opaque host payload, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<serde_json::Value>,
    /// Group this suggestion belongs to, if any. Grouped suggestions outrank
    /// ungrouped ones when the same label is produced by several branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<SuggestionGroup>,
    /// Tie-break rank within a group (or among ungrouped suggestions).
    #[serde(default)]
    pub priority: i32,
}

/// Named suggestion group with its own rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    pub key: String,
    #[serde(default)]
    pub priority: i32,
}

impl Suggestion {
    pub fn new(label: impl Into<String>) -> Self {
        Suggestion { label: label.into(), value: None, custom_data: None, group: None, priority: 0 }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn custom_data(mut self, data: serde_json::Value) -> Self {
        self.custom_data = Some(data);
        self
    }

    pub fn group(mut self, key: impl Into<String>, priority: i32) -> Self {
        self.group = Some(SuggestionGroup { key: key.into(), priority });
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Text a host should insert for this suggestion.
    pub fn insert_text(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.label)
    }
}

impl From<&str> for Suggestion {
    fn from(label: &str) -> Self {
        Suggestion::new(label)
    }
}

impl From<String> for Suggestion {
    fn from(label: String) -> Self {
        Suggestion::new(label)
    }
}
