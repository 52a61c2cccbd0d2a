//! ResetSharedAnswersHandler - Command handler that forgets every saved
//! shared-dimension answer of a questionnaire version.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, QuestionnaireVersionId};
use crate::ports::SharedAnswerStore;

#[derive(Debug, Clone)]
pub struct ResetSharedAnswersCommand {
    pub questionnaire_version: QuestionnaireVersionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSharedAnswersResult {
    /// Number of dimension sets removed.
    pub removed: usize,
}

pub struct ResetSharedAnswersHandler {
    shared: Arc<dyn SharedAnswerStore>,
}

impl ResetSharedAnswersHandler {
    pub fn new(shared: Arc<dyn SharedAnswerStore>) -> Self {
        Self { shared }
    }

    pub async fn handle(
        &self,
        cmd: ResetSharedAnswersCommand,
    ) -> Result<ResetSharedAnswersResult, DomainError> {
        let removed = self.shared.clear_shared_answers(cmd.questionnaire_version).await?;
        info!(version = %cmd.questionnaire_version, removed, "Shared answers reset");
        Ok(ResetSharedAnswersResult { removed })
    }
}
