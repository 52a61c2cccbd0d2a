//! In-Memory Shared Answer Store
//!
//! Saved dimension answers keyed by questionnaire version and dimension.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::SharedDimensionAnswers;
use crate::domain::foundation::{DimensionId, DomainError, QuestionnaireVersionId};
use crate::ports::SharedAnswerStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySharedAnswerStore {
    sets: Arc<RwLock<BTreeMap<(QuestionnaireVersionId, DimensionId), SharedDimensionAnswers>>>,
}

impl InMemorySharedAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedAnswerStore for InMemorySharedAnswerStore {
    async fn load_shared_answers(
        &self,
        version: QuestionnaireVersionId,
    ) -> Result<Vec<SharedDimensionAnswers>, DomainError> {
        let sets = self.sets.read().await;
        Ok(sets
            .iter()
            .filter(|((v, _), _)| *v == version)
            .map(|(_, set)| set.clone())
            .collect())
    }

    async fn save_shared_answers(&self, answers: SharedDimensionAnswers) -> Result<(), DomainError> {
        let key = (answers.questionnaire_version, answers.dimension_id);
        let mut sets = self.sets.write().await;
        sets.insert(key, answers);
        Ok(())
    }

    async fn clear_shared_answers(&self, version: QuestionnaireVersionId) -> Result<usize, DomainError> {
        let mut sets = self.sets.write().await;
        let before = sets.len();
        sets.retain(|(v, _), _| *v != version);
        Ok(before - sets.len())
    }
}
