//! Tokenizer/normalizer turning raw answers into token sets.
//!
//! Closed-choice codes are already canonical and pass through untouched.
//! Free text is lowercased, split on non-word characters, and filtered
//! for length and stopwords. The result is a set, so order carries no
//! meaning at this stage.

use std::collections::BTreeSet;

use crate::domain::assessment::AnswerValue;

/// Stopwords dropped during free-text tokenization. Must stay sorted for
/// the binary search in `is_stopword`.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "at", "be", "but", "by", "for", "from", "have", "in",
    "into", "is", "it", "of", "on", "or", "that", "the", "this", "to", "was", "were", "will",
    "with",
];

/// Tokens shorter than this are discarded from free text.
pub const MIN_TOKEN_LEN: usize = 4;

fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// Tokenizes a free-text answer into a normalized token set.
///
/// Lowercases, treats anything that is not alphanumeric or `_` as a
/// separator, and drops short tokens and stopwords. Idempotent: running
/// the output back through produces the same set.
pub fn tokenize_free_text(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .filter(|word| !is_stopword(word))
        .map(str::to_string)
        .collect()
}

/// Normalizes one category's raw answer into a token set.
///
/// Empty or missing input yields an empty set, never an error.
pub fn normalize(value: &AnswerValue) -> BTreeSet<String> {
    match value {
        AnswerValue::Selected(codes) => codes.clone(),
        AnswerValue::FreeText(text) => tokenize_free_text(text),
    }
}
