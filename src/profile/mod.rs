//! Questionnaire profile: the data-driven configuration surface.
//!
//! A profile bundles everything one questionnaire variant needs: the
//! categories and their options, the keyword dictionaries, the phrase
//! table, the statement templates, and the echoed output fields. The
//! same pipeline serves every variant by swapping the profile, so
//! vocabularies live in data rather than code.
//!
//! Profiles are loaded once at process start and treated as immutable
//! for the process lifetime.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::{Dictionary, PhraseBook, SlotRank, Template};

/// Errors that can occur while loading or validating a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse profile: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate category '{category}'")]
    DuplicateCategory { category: String },

    #[error("Duplicate option code '{code}' in category '{category}'")]
    DuplicateOptionCode { category: String, code: String },

    #[error("Dictionary '{dictionary}' has no rules")]
    EmptyDictionary { dictionary: String },

    #[error("Rule '{label}' in dictionary '{dictionary}' has no triggers")]
    EmptyTriggers { dictionary: String, label: String },

    #[error("Dictionary '{dictionary}' references unknown category '{category}'")]
    UnknownSourceCategory { dictionary: String, category: String },

    #[error("Echo field '{field}' references unknown category '{category}'")]
    UnknownEchoCategory { field: String, category: String },

    #[error("Output field '{field}' is assigned more than once")]
    DuplicateOutputField { field: String },

    #[error("Statement for field '{field}' has no templates")]
    EmptyTemplates { field: String },

    #[error("Slot '{slot}' of statement '{field}' references unknown source '{source_name}'")]
    UnknownSlotSource {
        field: String,
        slot: String,
        source_name: String,
    },
}

/// A (code, display text) pair within a closed-choice category.
///
/// Codes are the stable identifiers stored and transmitted; display
/// text is only for humans and is not guaranteed unique across
/// categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub code: String,
    pub display_text: String,
}

impl OptionEntry {
    /// Creates an option entry.
    pub fn new(code: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_text: display_text.into(),
        }
    }
}

/// One question group of the assessment.
///
/// A category with no options is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

impl CategorySpec {
    /// Returns true if this category accepts free text.
    pub fn is_free_text(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns true if the code belongs to this category's options.
    pub fn has_code(&self, code: &str) -> bool {
        self.options.iter().any(|option| option.code == code)
    }
}

/// Binds one dictionary to its source categories and output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySpec {
    /// Output field receiving the matched labels.
    pub field: String,
    /// Categories whose tokens feed this dictionary (union).
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub dictionary: Dictionary,
}

/// Where a template slot draws its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotBinding {
    /// Labels matched by a dictionary, narrowed by positional rank.
    /// With `phrase` set, the registered phrase for each label is used
    /// instead of the label itself.
    Dictionary {
        dictionary: String,
        #[serde(default)]
        rank: SlotRank,
        #[serde(default)]
        phrase: bool,
    },
    /// Normalized tokens of a category, humanized and optionally capped.
    Category {
        category: String,
        #[serde(default)]
        limit: Option<usize>,
    },
}

/// One composed statement: alternative templates plus slot bindings.
///
/// Several statements may target the same output field; the assembler
/// collects them into a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSpec {
    pub field: String,
    pub templates: Vec<Template>,
    #[serde(default)]
    pub slots: BTreeMap<String, SlotBinding>,
}

/// Echoes a category's normalized tokens back as a display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoSpec {
    pub field: String,
    pub category: String,
}

/// A complete questionnaire variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
    #[serde(default)]
    pub dictionaries: Vec<DictionarySpec>,
    #[serde(default)]
    pub phrases: PhraseBook,
    #[serde(default)]
    pub statements: Vec<StatementSpec>,
    #[serde(default)]
    pub echoes: Vec<EchoSpec>,
}

static BUILTIN: Lazy<Profile> = Lazy::new(|| {
    Profile::from_yaml_str(include_str!("../../data/ikigai.yaml"))
        .expect("built-in Ikigai profile must be valid")
});

impl Profile {
    /// Creates an empty profile with the given name.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            dictionaries: Vec::new(),
            phrases: PhraseBook::new(),
            statements: Vec::new(),
            echoes: Vec::new(),
        }
    }

    /// Returns the built-in Ikigai profile.
    pub fn builtin() -> &'static Profile {
        &BUILTIN
    }

    /// Parses and validates a profile from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProfileError> {
        let profile: Profile = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reads, parses, and validates a profile file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Looks up a dictionary spec by dictionary name.
    pub fn dictionary(&self, name: &str) -> Option<&DictionarySpec> {
        self.dictionaries.iter().find(|d| d.dictionary.name == name)
    }

    /// Checks the structural invariants of this profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut category_names = BTreeSet::new();
        for category in &self.categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(ProfileError::DuplicateCategory {
                    category: category.name.clone(),
                });
            }
            let mut codes = BTreeSet::new();
            for option in &category.options {
                if !codes.insert(option.code.as_str()) {
                    return Err(ProfileError::DuplicateOptionCode {
                        category: category.name.clone(),
                        code: option.code.clone(),
                    });
                }
            }
        }

        let mut fields = BTreeSet::new();
        let mut dictionary_names = BTreeSet::new();
        for spec in &self.dictionaries {
            let name = spec.dictionary.name.as_str();
            dictionary_names.insert(name);
            if spec.dictionary.rules.is_empty() {
                return Err(ProfileError::EmptyDictionary {
                    dictionary: name.to_string(),
                });
            }
            for rule in &spec.dictionary.rules {
                if rule.triggers.is_empty() {
                    return Err(ProfileError::EmptyTriggers {
                        dictionary: name.to_string(),
                        label: rule.label.clone(),
                    });
                }
            }
            for category in &spec.categories {
                if !category_names.contains(category.as_str()) {
                    return Err(ProfileError::UnknownSourceCategory {
                        dictionary: name.to_string(),
                        category: category.clone(),
                    });
                }
            }
            if !fields.insert(spec.field.as_str()) {
                return Err(ProfileError::DuplicateOutputField {
                    field: spec.field.clone(),
                });
            }
        }

        for echo in &self.echoes {
            if !category_names.contains(echo.category.as_str()) {
                return Err(ProfileError::UnknownEchoCategory {
                    field: echo.field.clone(),
                    category: echo.category.clone(),
                });
            }
            if !fields.insert(echo.field.as_str()) {
                return Err(ProfileError::DuplicateOutputField {
                    field: echo.field.clone(),
                });
            }
        }

        // Statement fields may repeat among themselves (they accumulate
        // into lists) but must not collide with dictionary/echo fields.
        for statement in &self.statements {
            if fields.contains(statement.field.as_str()) {
                return Err(ProfileError::DuplicateOutputField {
                    field: statement.field.clone(),
                });
            }

            if statement.templates.is_empty() {
                return Err(ProfileError::EmptyTemplates {
                    field: statement.field.clone(),
                });
            }
            for (slot, binding) in &statement.slots {
                match binding {
                    SlotBinding::Dictionary { dictionary, .. } => {
                        if !dictionary_names.contains(dictionary.as_str()) {
                            return Err(ProfileError::UnknownSlotSource {
                                field: statement.field.clone(),
                                slot: slot.clone(),
                                source_name: dictionary.clone(),
                            });
                        }
                    }
                    SlotBinding::Category { category, .. } => {
                        if !category_names.contains(category.as_str()) {
                            return Err(ProfileError::UnknownSlotSource {
                                field: statement.field.clone(),
                                slot: slot.clone(),
                                source_name: category.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
