//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `PURPOSE_COMPASS` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use purpose_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let profile = config.load_profile().expect("Failed to load profile");
//! println!("Active profile: {}", profile.name);
//! ```

mod error;

pub use error::{ConfigError, ValidationError};

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::analysis::{FirstTemplate, RandomTemplate, TemplateSelector};
use crate::profile::{Profile, ProfileError};

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Profile selection (which questionnaire variant is active)
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Statement composition settings
    #[serde(default)]
    pub compose: ComposeConfig,
}

/// Profile selection configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    /// Path to a profile YAML file. When unset, the built-in Ikigai
    /// profile is used.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Statement composition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeConfig {
    /// Whether template selection is randomized per call.
    #[serde(default = "default_randomize")]
    pub randomize_templates: bool,

    /// Fixed RNG seed for reproducible template selection.
    #[serde(default)]
    pub template_seed: Option<u64>,
}

fn default_randomize() -> bool {
    true
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            randomize_templates: true,
            template_seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PURPOSE_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PURPOSE_COMPASS__PROFILE__PATH=variants/ikigai.yaml`
    /// - `PURPOSE_COMPASS__COMPOSE__TEMPLATE_SEED=42`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PURPOSE_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.profile.path {
            let extension = path.extension().and_then(|ext| ext.to_str());
            if !matches!(extension, Some("yaml") | Some("yml")) {
                return Err(ValidationError::InvalidProfilePath);
            }
        }

        if self.compose.template_seed.is_some() && !self.compose.randomize_templates {
            return Err(ValidationError::SeedWithoutRandomization);
        }

        Ok(())
    }

    /// Loads the configured profile, falling back to the built-in one.
    pub fn load_profile(&self) -> Result<Profile, ProfileError> {
        match &self.profile.path {
            Some(path) => Profile::from_yaml_file(path),
            None => Ok(Profile::builtin().clone()),
        }
    }
}

impl ComposeConfig {
    /// Builds the template selection strategy this configuration asks for.
    pub fn selector(&self) -> Box<dyn TemplateSelector> {
        if !self.randomize_templates {
            return Box::new(FirstTemplate);
        }
        match self.template_seed {
            Some(seed) => Box::new(RandomTemplate::with_seed(seed)),
            None => Box::new(RandomTemplate::new()),
        }
    }
}
