//! Shared answer store port - dimension answers reused across assessments.
//!
//! One saved set per (questionnaire version, dimension). Saving a set
//! replaces the previous one of that dimension as a whole.

use async_trait::async_trait;

use crate::domain::assessment::SharedDimensionAnswers;
use crate::domain::foundation::{DomainError, QuestionnaireVersionId};

#[async_trait]
pub trait SharedAnswerStore: Send + Sync {
    /// Reads every saved set of a questionnaire version.
    async fn load_shared_answers(
        &self,
        version: QuestionnaireVersionId,
    ) -> Result<Vec<SharedDimensionAnswers>, DomainError>;

    /// Replaces the saved set of one dimension.
    async fn save_shared_answers(&self, answers: SharedDimensionAnswers) -> Result<(), DomainError>;

    /// Drops every saved set of a version. Returns how many were removed.
    async fn clear_shared_answers(&self, version: QuestionnaireVersionId) -> Result<usize, DomainError>;
}
