//! Purpose Compass - Questionnaire Assessment Engine
//!
//! This crate derives detected gifts, career suggestions, and a
//! natural-language purpose statement from a user's multi-category
//! questionnaire answers through a pure pipeline: normalize, match,
//! compose, assemble.

pub mod config;
pub mod domain;
pub mod profile;
