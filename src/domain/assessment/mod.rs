//! Assessment module - Submission value objects and contract checks.

mod answers;

pub use answers::{AnswerSet, AnswerValue};
