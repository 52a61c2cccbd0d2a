//! GetSharedAnswersHandler - Query handler for saved shared-dimension
//! answers, used to prefill a new assessment.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::assessment::SharedDimensionAnswers;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionnaireVersionId};
use crate::ports::{QuestionnaireReader, SharedAnswerStore};

/// Query for the saved answers of one questionnaire version.
#[derive(Debug, Clone)]
pub struct GetSharedAnswersQuery {
    pub questionnaire_version: QuestionnaireVersionId,
}

#[derive(Debug, Error)]
pub enum GetSharedAnswersError {
    #[error("Questionnaire version not found: {0}")]
    QuestionnaireNotFound(QuestionnaireVersionId),

    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

impl From<GetSharedAnswersError> for DomainError {
    fn from(err: GetSharedAnswersError) -> Self {
        match err {
            GetSharedAnswersError::QuestionnaireNotFound(_) => {
                DomainError::new(ErrorCode::QuestionnaireNotFound, err.to_string())
            }
            GetSharedAnswersError::Infrastructure(inner) => inner,
        }
    }
}

pub struct GetSharedAnswersHandler {
    questionnaires: Arc<dyn QuestionnaireReader>,
    shared: Arc<dyn SharedAnswerStore>,
}

impl GetSharedAnswersHandler {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireReader>,
        shared: Arc<dyn SharedAnswerStore>,
    ) -> Self {
        Self {
            questionnaires,
            shared,
        }
    }

    /// Saved sets of dimensions still marked shared, in display order.
    pub async fn handle(
        &self,
        query: GetSharedAnswersQuery,
    ) -> Result<Vec<SharedDimensionAnswers>, GetSharedAnswersError> {
        let questionnaire = self
            .questionnaires
            .find_by_version(query.questionnaire_version)
            .await?
            .ok_or(GetSharedAnswersError::QuestionnaireNotFound(query.questionnaire_version))?;
        let mut saved = self.shared.load_shared_answers(query.questionnaire_version).await?;

        let order: Vec<_> = questionnaire
            .dimensions()
            .iter()
            .filter(|d| d.is_shared)
            .map(|d| d.id)
            .collect();
        saved.retain(|set| order.contains(&set.dimension_id));
        saved.sort_by_key(|set| order.iter().position(|id| *id == set.dimension_id));
        Ok(saved)
    }
}
