//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the scoring core and the outside world. Adapters implement these ports.
//!
//! - `QuestionnaireReader` - Versioned questionnaire definitions
//! - `AnswerStore` - Overwrite-all answer rows per assessment
//! - `ResultStore` - Atomic replacement of derived results
//! - `SharedAnswerStore` - Dimension answers reused across assessments

mod answer_store;
mod questionnaire_reader;
mod result_store;
mod shared_answer_store;

pub use answer_store::AnswerStore;
pub use questionnaire_reader::QuestionnaireReader;
pub use result_store::ResultStore;
pub use shared_answer_store::SharedAnswerStore;
