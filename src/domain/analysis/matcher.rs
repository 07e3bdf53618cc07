//! Category matcher applying keyword dictionaries to token sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A label and the trigger substrings that fire it.
///
/// Triggers use containment matching: "teach" fires on the token
/// "teaching". This deliberately favors recall over precision; outputs
/// are advisory, not authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub label: String,
    pub triggers: Vec<String>,
}

impl KeywordRule {
    /// Creates a rule from a label and its trigger substrings.
    pub fn new<I, S>(label: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if any trigger occurs as a substring of any token.
    pub fn fires(&self, tokens: &BTreeSet<String>) -> bool {
        self.triggers
            .iter()
            .any(|trigger| tokens.iter().any(|token| token.contains(trigger.as_str())))
    }
}

/// Ordered rule set with a fallback label for when nothing fires.
///
/// Rules are evaluated in declaration order; a label is appended the
/// first time its rule fires and never again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub name: String,
    pub rules: Vec<KeywordRule>,
    pub default_label: String,
}

impl Dictionary {
    /// Creates a dictionary from ordered rules and a fallback label.
    pub fn new(
        name: impl Into<String>,
        rules: Vec<KeywordRule>,
        default_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rules,
            default_label: default_label.into(),
        }
    }

    /// Applies this dictionary to a token set.
    ///
    /// Never returns an empty label list: when zero rules fire the
    /// result is exactly the configured default label, so callers do
    /// not special-case emptiness.
    pub fn apply(&self, tokens: &BTreeSet<String>) -> MatchResult {
        let mut labels: Vec<String> = Vec::new();

        for rule in &self.rules {
            if labels.contains(&rule.label) {
                continue;
            }
            if rule.fires(tokens) {
                debug!(dictionary = %self.name, label = %rule.label, "keyword rule fired");
                labels.push(rule.label.clone());
            }
        }

        if labels.is_empty() {
            debug!(dictionary = %self.name, "no rule fired, using fallback label");
            labels.push(self.default_label.clone());
        }

        MatchResult {
            dictionary: self.name.clone(),
            labels,
            tokens: tokens.clone(),
        }
    }
}

/// Ordered, duplicate-free labels plus the token set that produced them.
///
/// The tokens are kept for downstream phrase composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub dictionary: String,
    pub labels: Vec<String>,
    pub tokens: BTreeSet<String>,
}
