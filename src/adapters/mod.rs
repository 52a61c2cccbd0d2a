//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory questionnaire reader, assessment and shared answer stores
//! - `fixture` - YAML questionnaire and answer fixtures

pub mod fixture;
pub mod memory;

pub use fixture::{load_fixture, Fixture, FixtureError};
pub use memory::{InMemoryAssessmentStore, InMemoryQuestionnaireReader, InMemorySharedAnswerStore};
