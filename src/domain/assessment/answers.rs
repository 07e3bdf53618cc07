//! Answer value objects for a single questionnaire submission.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AssessmentError;
use crate::profile::Profile;

/// One category's raw answer: selected option codes or a free-text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Codes selected from a closed-choice picker.
    Selected(BTreeSet<String>),
    /// Free text typed by the user.
    FreeText(String),
}

impl AnswerValue {
    /// Returns true if the answer carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Selected(codes) => codes.is_empty(),
            AnswerValue::FreeText(text) => text.trim().is_empty(),
        }
    }
}

/// A full submission: category name mapped to its raw answer.
///
/// Created fresh per submission by the form layer and never mutated by
/// the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records selected option codes for a closed-choice category.
    pub fn select<I, S>(mut self, category: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.insert(
            category.into(),
            AnswerValue::Selected(codes.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Records a free-text answer for a category.
    pub fn free_text(mut self, category: impl Into<String>, text: impl Into<String>) -> Self {
        self.answers
            .insert(category.into(), AnswerValue::FreeText(text.into()));
        self
    }

    /// Returns the answer recorded for a category, if any.
    pub fn get(&self, category: &str) -> Option<&AnswerValue> {
        self.answers.get(category)
    }

    /// Returns true if no category has an answer.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates over recorded (category, answer) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.answers.iter()
    }

    /// Checks the submission against the active profile's contract.
    ///
    /// Rejects unknown categories, unknown option codes, and answers of
    /// the wrong kind for their category. Required categories must carry
    /// a non-empty answer; optional categories may be absent or empty.
    pub fn validate(&self, profile: &Profile) -> Result<(), AssessmentError> {
        for (name, value) in &self.answers {
            let category = profile
                .category(name)
                .ok_or_else(|| AssessmentError::unknown_category(name.clone()))?;

            match value {
                AnswerValue::Selected(codes) => {
                    if category.is_free_text() {
                        return Err(AssessmentError::wrong_answer_kind(name.clone(), "free-text"));
                    }
                    for code in codes {
                        if !category.has_code(code) {
                            return Err(AssessmentError::unknown_option_code(
                                name.clone(),
                                code.clone(),
                            ));
                        }
                    }
                }
                AnswerValue::FreeText(_) => {
                    if !category.is_free_text() {
                        return Err(AssessmentError::wrong_answer_kind(
                            name.clone(),
                            "closed-choice",
                        ));
                    }
                }
            }
        }

        for category in &profile.categories {
            if !category.required {
                continue;
            }
            let present = self
                .answers
                .get(&category.name)
                .map(|value| !value.is_empty())
                .unwrap_or(false);
            if !present {
                return Err(AssessmentError::missing_required(category.name.clone()));
            }
        }

        Ok(())
    }
}
