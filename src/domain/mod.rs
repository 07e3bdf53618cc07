//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `assessment` - Submission value objects and contract checks
//! - `analysis` - Pure pipeline services (normalize, match, compose, assemble)

pub mod analysis;
pub mod assessment;
pub mod foundation;
