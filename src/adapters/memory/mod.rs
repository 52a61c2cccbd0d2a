//! In-memory adapters for every port.
//!
//! Used by tests, fixtures, and the demo binary. State lives behind
//! `Arc<RwLock<..>>`, so clones share the same data.

mod assessment_store;
mod questionnaire_reader;
mod shared_answer_store;

pub use assessment_store::InMemoryAssessmentStore;
pub use questionnaire_reader::InMemoryQuestionnaireReader;
pub use shared_answer_store::InMemorySharedAnswerStore;
