//! Statement composer: natural list formatting, humanization, and
//! slot-based templates.
//!
//! Template selection can be randomized for varied user-facing copy.
//! Randomized wording is not reproducible across calls; tests that need
//! exact text use [`FirstTemplate`] or a seeded [`RandomTemplate`].

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Joins items into natural prose.
///
/// Zero items render as the empty string, one as itself, two as
/// "A and B", three or more with an Oxford comma: "A, B, and C".
/// Every list embedded into prose goes through this one function.
pub fn join_natural<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        _ => {
            let mut out = String::new();
            for item in &items[..items.len() - 1] {
                out.push_str(item.as_ref());
                out.push_str(", ");
            }
            out.push_str("and ");
            out.push_str(items[items.len() - 1].as_ref());
            out
        }
    }
}

/// Registered human phrases for codes and labels.
///
/// A registered phrase always wins over mechanical humanization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseBook {
    phrases: BTreeMap<String, String>,
}

impl PhraseBook {
    /// Creates an empty phrase book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a phrase for a code, replacing any existing one.
    pub fn register(mut self, code: impl Into<String>, phrase: impl Into<String>) -> Self {
        self.phrases.insert(code.into(), phrase.into());
        self
    }

    /// Returns the registered phrase for a code, if any.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.phrases.get(code).map(String::as_str)
    }
}

/// Converts a raw code into display prose.
///
/// A phrase registered in the book wins; otherwise separators become
/// spaces and each word is title-cased ("problem_solving" becomes
/// "Problem Solving").
pub fn humanize(code: &str, phrases: &PhraseBook) -> String {
    if let Some(phrase) = phrases.get(code) {
        return phrase.to_string();
    }

    code.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Positional emphasis within an ordered label list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRank {
    /// The first label only.
    Primary,
    /// The second label only.
    Secondary,
    /// Everything after the first two.
    Additional,
    /// The whole list.
    #[default]
    All,
}

/// Returns the sub-slice of labels selected by a rank.
///
/// Ranks past the end of the list select nothing; the caller renders
/// an empty fragment rather than failing.
pub fn rank_slice(labels: &[String], rank: SlotRank) -> &[String] {
    match rank {
        SlotRank::Primary => &labels[..labels.len().min(1)],
        SlotRank::Secondary => {
            if labels.len() > 1 {
                &labels[1..2]
            } else {
                &[]
            }
        }
        SlotRank::Additional => {
            if labels.len() > 2 {
                &labels[2..]
            } else {
                &[]
            }
        }
        SlotRank::All => labels,
    }
}

/// A statement pattern with named `{slot}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    /// Creates a template from a pattern string.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Returns the raw pattern.
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Renders the template with the given slot values.
    ///
    /// Slots with no value render as empty fragments, never as literal
    /// placeholders. Whitespace runs left behind by empty fragments are
    /// collapsed and the result is trimmed.
    pub fn render(&self, slots: &BTreeMap<String, String>) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut chars = self.0.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                out.push(c);
                continue;
            }

            let mut name = String::new();
            let mut closed = false;
            for next in chars.by_ref() {
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if closed {
                if let Some(value) = slots.get(&name) {
                    out.push_str(value);
                }
            } else {
                // Unterminated brace: keep the literal text.
                out.push('{');
                out.push_str(&name);
            }
        }

        collapse_whitespace(&out)
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strategy for choosing among alternative phrasings of one statement.
pub trait TemplateSelector {
    /// Returns an index in `0..len`. `len` is always at least 1.
    fn pick(&mut self, len: usize) -> usize;
}

/// Always picks the first template. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTemplate;

impl TemplateSelector for FirstTemplate {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Picks templates with a seedable RNG.
///
/// Production wording varies per call; a fixed seed makes the selection
/// sequence reproducible for tests.
#[derive(Debug, Clone)]
pub struct RandomTemplate {
    rng: StdRng,
}

impl RandomTemplate {
    /// Creates a selector seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSelector for RandomTemplate {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}
