//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, strategy, errors, timestamps)
//! - `questionnaire` - Versioned questionnaire definitions and option scores
//! - `assessment` - Answers, results, and completion status of one assessment
//! - `applicability` - Condition graph and applicability resolution
//! - `scoring` - Dimension, economic, and total scoring
//! - `advisory` - Score bands and per-dimension advice

pub mod advisory;
pub mod applicability;
pub mod assessment;
pub mod foundation;
pub mod questionnaire;
pub mod scoring;
