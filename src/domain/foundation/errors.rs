//! Error types for the assessment domain.

use thiserror::Error;

/// Errors raised when a submission violates the input contract.
///
/// The form layer is expected to validate submissions before they reach
/// the core, so every variant here is a caller bug rather than a user
/// error. The core fails fast instead of matching garbage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Unknown category '{category}'")]
    UnknownCategory { category: String },

    #[error("Unknown option code '{code}' in category '{category}'")]
    UnknownOptionCode { category: String, code: String },

    #[error("Category '{category}' expects a {expected} answer")]
    WrongAnswerKind {
        category: String,
        expected: &'static str,
    },

    #[error("Required category '{category}' has no answer")]
    MissingRequired { category: String },
}

impl AssessmentError {
    /// Creates an unknown category error.
    pub fn unknown_category(category: impl Into<String>) -> Self {
        AssessmentError::UnknownCategory {
            category: category.into(),
        }
    }

    /// Creates an unknown option code error.
    pub fn unknown_option_code(category: impl Into<String>, code: impl Into<String>) -> Self {
        AssessmentError::UnknownOptionCode {
            category: category.into(),
            code: code.into(),
        }
    }

    /// Creates a wrong answer kind error.
    pub fn wrong_answer_kind(category: impl Into<String>, expected: &'static str) -> Self {
        AssessmentError::WrongAnswerKind {
            category: category.into(),
            expected,
        }
    }

    /// Creates a missing required category error.
    pub fn missing_required(category: impl Into<String>) -> Self {
        AssessmentError::MissingRequired {
            category: category.into(),
        }
    }
}
