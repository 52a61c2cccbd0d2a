//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the strategy enum, timestamps, and error types
//! that form the vocabulary of the assessment domain.

mod errors;
mod ids;
mod strategy;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{AssessmentId, DimensionId, OptionId, QuestionId, QuestionnaireVersionId};
pub use strategy::{Strategy, UnknownStrategy};
pub use timestamp::Timestamp;
