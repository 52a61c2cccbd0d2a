//! SubmitAnswersHandler - Command handler for overwrite-all answer
//! submission followed by recomputation.
//!
//! With shared dimensions enabled, answered shared dimensions are saved
//! for later assessments and unanswered ones are prefilled from the
//! saved answers.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::assessment::{
    prefill_inputs, validate_inputs, AnswerInput, AnswerSheet, AnswerValidationError,
    SharedDimensionAnswers,
};
use crate::domain::foundation::{
    AssessmentId, DimensionId, DomainError, ErrorCode, QuestionnaireVersionId,
};
use crate::ports::{AnswerStore, QuestionnaireReader, SharedAnswerStore};

use super::{RecomputeAssessmentHandler, RecomputeAssessmentResult, RecomputeError};

/// Command to replace all answers of an assessment.
#[derive(Debug, Clone)]
pub struct SubmitAnswersCommand {
    pub assessment_id: AssessmentId,
    pub questionnaire_version: QuestionnaireVersionId,
    pub answers: Vec<AnswerInput>,
    /// Save answered shared dimensions and prefill unanswered ones.
    pub use_shared_dimensions: bool,
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswersResult {
    /// Number of answer rows written before resolution.
    pub stored_rows: usize,
    /// Shared dimensions filled from saved answers.
    pub prefilled_dimensions: Vec<DimensionId>,
    /// Shared dimensions whose answers were saved for reuse.
    pub saved_shared_dimensions: Vec<DimensionId>,
    pub recomputation: RecomputeAssessmentResult,
}

#[derive(Debug, Error)]
pub enum SubmitAnswersError {
    #[error("Questionnaire version not found: {0}")]
    QuestionnaireNotFound(QuestionnaireVersionId),

    #[error(transparent)]
    InvalidAnswer(#[from] AnswerValidationError),

    /// Answers were stored but results could not be recomputed.
    #[error("Answers stored, recomputation failed: {0}")]
    Recompute(#[from] RecomputeError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<SubmitAnswersError> for DomainError {
    fn from(err: SubmitAnswersError) -> Self {
        match err {
            SubmitAnswersError::QuestionnaireNotFound(version) => DomainError::new(
                ErrorCode::QuestionnaireNotFound,
                format!("Questionnaire version not found: {}", version),
            ),
            SubmitAnswersError::InvalidAnswer(inner) => inner.into(),
            SubmitAnswersError::Recompute(inner) => inner.into(),
            SubmitAnswersError::Domain(inner) => inner,
        }
    }
}

/// Handler for answer submission.
pub struct SubmitAnswersHandler {
    questionnaires: Arc<dyn QuestionnaireReader>,
    answers: Arc<dyn AnswerStore>,
    shared: Arc<dyn SharedAnswerStore>,
    recompute: Arc<RecomputeAssessmentHandler>,
}

impl SubmitAnswersHandler {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireReader>,
        answers: Arc<dyn AnswerStore>,
        shared: Arc<dyn SharedAnswerStore>,
        recompute: Arc<RecomputeAssessmentHandler>,
    ) -> Self {
        Self {
            questionnaires,
            answers,
            shared,
            recompute,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswersCommand,
    ) -> Result<SubmitAnswersResult, SubmitAnswersError> {
        // 1. Load the questionnaire the answers refer to
        let questionnaire = self
            .questionnaires
            .find_by_version(cmd.questionnaire_version)
            .await?
            .ok_or(SubmitAnswersError::QuestionnaireNotFound(cmd.questionnaire_version))?;

        // 2. Split off answers to share, prefill the rest from saved ones
        let (inputs, prefilled_dimensions, to_share) = if cmd.use_shared_dimensions {
            let to_share = SharedDimensionAnswers::collect(&questionnaire, &cmd.answers);
            let saved = self
                .shared
                .load_shared_answers(cmd.questionnaire_version)
                .await?;
            let (inputs, prefilled) = prefill_inputs(&questionnaire, cmd.answers, &saved);
            (inputs, prefilled, to_share)
        } else {
            (cmd.answers, Vec::new(), Vec::new())
        };

        // 3. Validate inputs into applicable rows
        let rows = validate_inputs(&questionnaire, &inputs)?;
        let stored_rows = rows.len();

        // 4. Replace stored answers, save shared ones, and recompute under one lock
        let _guard = self.recompute.locks().acquire(cmd.assessment_id).await;
        self.answers
            .replace_answers(AnswerSheet::new(cmd.assessment_id, cmd.questionnaire_version, rows))
            .await?;
        debug!(assessment_id = %cmd.assessment_id, rows = stored_rows, "Answers replaced");

        let mut saved_shared_dimensions = Vec::with_capacity(to_share.len());
        for set in to_share {
            saved_shared_dimensions.push(set.dimension_id);
            self.shared.save_shared_answers(set).await?;
        }
        if !saved_shared_dimensions.is_empty() || !prefilled_dimensions.is_empty() {
            debug!(
                assessment_id = %cmd.assessment_id,
                saved = saved_shared_dimensions.len(),
                prefilled = prefilled_dimensions.len(),
                "Shared dimensions applied"
            );
        }

        let recomputation = self.recompute.recompute_locked(cmd.assessment_id).await?;

        Ok(SubmitAnswersResult {
            stored_rows,
            prefilled_dimensions,
            saved_shared_dimensions,
            recomputation,
        })
    }
}
