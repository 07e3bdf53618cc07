//! Result assembler: runs the full pipeline and merges its outputs.
//!
//! Data flows strictly one way: raw answers are normalized into tokens,
//! tokens are matched against dictionaries, labels and tokens are
//! composed into statements, and everything is merged into one
//! [`RecommendationResult`]. Each invocation allocates its own state,
//! so concurrent callers need no coordination.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::analysis::composer::{
    humanize, join_natural, rank_slice, FirstTemplate, RandomTemplate, TemplateSelector,
};
use crate::domain::analysis::matcher::MatchResult;
use crate::domain::analysis::normalizer::normalize;
use crate::domain::assessment::AnswerSet;
use crate::domain::foundation::{AssessmentError, AssessmentId, Timestamp};
use crate::profile::{Profile, SlotBinding};

/// One output field's value: a list of display strings or composed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Labels(Vec<String>),
    Text(String),
}

impl OutputValue {
    /// Returns the label list, if this value is one.
    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            OutputValue::Labels(labels) => Some(labels),
            OutputValue::Text(_) => None,
        }
    }

    /// Returns the composed text, if this value is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputValue::Text(text) => Some(text),
            OutputValue::Labels(_) => None,
        }
    }
}

/// The final output of one assessment run.
///
/// Field names come from the active profile, not from the core, so the
/// same result shape serves every questionnaire variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub id: AssessmentId,
    pub generated_at: Timestamp,
    pub fields: BTreeMap<String, OutputValue>,
}

impl RecommendationResult {
    /// Returns the value of an output field, if present.
    pub fn get(&self, field: &str) -> Option<&OutputValue> {
        self.fields.get(field)
    }
}

/// The assessment pipeline for one profile.
///
/// Holds no per-request state; only the profile and the template
/// selection strategy live here.
pub struct AssessmentPipeline {
    profile: Profile,
    selector: Box<dyn TemplateSelector>,
}

impl AssessmentPipeline {
    /// Creates a pipeline with randomized template selection.
    pub fn new(profile: Profile) -> Self {
        Self::with_selector(profile, RandomTemplate::new())
    }

    /// Creates a pipeline that always picks the first template.
    ///
    /// Output wording is fully reproducible; used by tests and exports
    /// that need stable text.
    pub fn deterministic(profile: Profile) -> Self {
        Self::with_selector(profile, FirstTemplate)
    }

    /// Creates a pipeline with a custom template selection strategy.
    pub fn with_selector(profile: Profile, selector: impl TemplateSelector + 'static) -> Self {
        Self {
            profile,
            selector: Box::new(selector),
        }
    }

    /// Returns the active profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Runs the full pipeline on one validated submission.
    ///
    /// Fails fast on contract violations (unknown category or option
    /// code, wrong answer kind, missing required category). Absence of
    /// keyword matches is never an error; dictionaries fall back to
    /// their configured default label.
    pub fn assess(&mut self, answers: &AnswerSet) -> Result<RecommendationResult, AssessmentError> {
        answers.validate(&self.profile)?;

        let tokens_by_category = self.normalize_categories(answers);
        let matches = self.match_dictionaries(&tokens_by_category);

        let mut fields: BTreeMap<String, OutputValue> = BTreeMap::new();

        for spec in &self.profile.dictionaries {
            if let Some(result) = matches.get(&spec.dictionary.name) {
                fields.insert(spec.field.clone(), OutputValue::Labels(result.labels.clone()));
            }
        }

        for (field, value) in self.compose_statements(&tokens_by_category, &matches) {
            fields.insert(field, value);
        }

        for echo in &self.profile.echoes {
            let tokens = tokens_by_category
                .get(&echo.category)
                .cloned()
                .unwrap_or_default();
            let display: Vec<String> = tokens
                .iter()
                .map(|token| humanize(token, &self.profile.phrases))
                .collect();
            fields.insert(echo.field.clone(), OutputValue::Labels(display));
        }

        debug!(profile = %self.profile.name, fields = fields.len(), "assessment assembled");

        Ok(RecommendationResult {
            id: AssessmentId::new(),
            generated_at: Timestamp::now(),
            fields,
        })
    }

    fn normalize_categories(&self, answers: &AnswerSet) -> BTreeMap<String, BTreeSet<String>> {
        self.profile
            .categories
            .iter()
            .map(|category| {
                let tokens = answers
                    .get(&category.name)
                    .map(normalize)
                    .unwrap_or_default();
                (category.name.clone(), tokens)
            })
            .collect()
    }

    fn match_dictionaries(
        &self,
        tokens_by_category: &BTreeMap<String, BTreeSet<String>>,
    ) -> BTreeMap<String, MatchResult> {
        let mut matches = BTreeMap::new();

        for spec in &self.profile.dictionaries {
            let mut tokens = BTreeSet::new();
            for category in &spec.categories {
                if let Some(found) = tokens_by_category.get(category) {
                    tokens.extend(found.iter().cloned());
                }
            }
            let result = spec.dictionary.apply(&tokens);
            debug!(
                dictionary = %spec.dictionary.name,
                labels = result.labels.len(),
                "dictionary evaluated"
            );
            matches.insert(spec.dictionary.name.clone(), result);
        }

        matches
    }

    fn compose_statements(
        &mut self,
        tokens_by_category: &BTreeMap<String, BTreeSet<String>>,
        matches: &BTreeMap<String, MatchResult>,
    ) -> BTreeMap<String, OutputValue> {
        let mut texts: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for spec in &self.profile.statements {
            let choice = self.selector.pick(spec.templates.len());
            let template = &spec.templates[choice.min(spec.templates.len() - 1)];

            let mut slots = BTreeMap::new();
            let mut filled = spec.slots.is_empty();
            for (name, binding) in &spec.slots {
                let value = slot_value(&self.profile, binding, tokens_by_category, matches);
                if !value.is_empty() {
                    filled = true;
                }
                slots.insert(name.clone(), value);
            }

            // A statement whose every slot came up empty is dropped
            // rather than rendered as a hollow sentence.
            if !filled {
                continue;
            }

            let text = template.render(&slots);
            if text.is_empty() {
                continue;
            }
            texts.entry(spec.field.clone()).or_default().push(text);
        }

        texts
            .into_iter()
            .map(|(field, mut rendered)| {
                let value = if rendered.len() == 1 {
                    OutputValue::Text(rendered.remove(0))
                } else {
                    OutputValue::Labels(rendered)
                };
                (field, value)
            })
            .collect()
    }
}

fn slot_value(
    profile: &Profile,
    binding: &SlotBinding,
    tokens_by_category: &BTreeMap<String, BTreeSet<String>>,
    matches: &BTreeMap<String, MatchResult>,
) -> String {
    match binding {
        SlotBinding::Dictionary {
            dictionary,
            rank,
            phrase,
        } => {
            let Some(result) = matches.get(dictionary) else {
                return String::new();
            };
            let selected = rank_slice(&result.labels, *rank);
            if *phrase {
                let phrased: Vec<String> = selected
                    .iter()
                    .map(|label| {
                        profile
                            .phrases
                            .get(label)
                            .unwrap_or(label.as_str())
                            .to_string()
                    })
                    .collect();
                join_natural(&phrased)
            } else {
                join_natural(selected)
            }
        }
        SlotBinding::Category { category, limit } => {
            let Some(tokens) = tokens_by_category.get(category) else {
                return String::new();
            };
            let take = limit.unwrap_or(usize::MAX);
            let items: Vec<String> = tokens
                .iter()
                .take(take)
                .map(|token| humanize(token, &profile.phrases))
                .collect();
            join_natural(&items)
        }
    }
}
