//! Answer store port - per-assessment answer rows.
//!
//! Writes are overwrite-all: an assessment's answer sheet is always
//! replaced as a whole, never patched row by row.

use async_trait::async_trait;

use crate::domain::assessment::AnswerSheet;
use crate::domain::foundation::{AssessmentId, DomainError};

#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Reads all answer rows of an assessment.
    ///
    /// Returns `None` if the assessment has never been answered.
    async fn load_answer_sheet(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<AnswerSheet>, DomainError>;

    /// Replaces all answer rows of an assessment.
    ///
    /// Does not touch derived results; callers recompute afterwards.
    async fn replace_answers(&self, sheet: AnswerSheet) -> Result<(), DomainError>;
}
