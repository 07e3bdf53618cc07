//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Purpose Compass domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::AssessmentError;
pub use ids::AssessmentId;
pub use timestamp::Timestamp;
