//! Analysis Module - The pure assessment pipeline.
//!
//! Stateless services that turn raw answers into a recommendation
//! result. Data flows one way through four components:
//!
//! - `normalizer` - raw answers to deduplicated lowercase token sets
//! - `matcher` - token sets to ordered, duplicate-free label lists
//! - `composer` - labels and tokens to natural-language sentences
//! - `assembler` - everything merged into one result mapping
//!
//! All functions are pure; dictionaries and templates are read-only
//! after process start, so concurrent invocations need no coordination.

mod assembler;
mod composer;
mod matcher;
mod normalizer;

pub use assembler::{AssessmentPipeline, OutputValue, RecommendationResult};
pub use composer::{
    humanize, join_natural, rank_slice, FirstTemplate, PhraseBook, RandomTemplate, SlotRank,
    Template, TemplateSelector,
};
pub use matcher::{Dictionary, KeywordRule, MatchResult};
pub use normalizer::{normalize, tokenize_free_text, MIN_TOKEN_LEN, STOPWORDS};
