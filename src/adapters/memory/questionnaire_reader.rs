//! In-Memory Questionnaire Reader
//!
//! Holds questionnaire versions registered up front. Useful for tests,
//! fixtures, and the demo binary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, QuestionnaireVersionId};
use crate::domain::questionnaire::Questionnaire;
use crate::ports::QuestionnaireReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionnaireReader {
    versions: Arc<RwLock<HashMap<QuestionnaireVersionId, Arc<Questionnaire>>>>,
}

impl InMemoryQuestionnaireReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a version, replacing any previous definition with the same id.
    pub async fn insert(&self, questionnaire: Questionnaire) {
        let mut versions = self.versions.write().await;
        versions.insert(questionnaire.version_id(), Arc::new(questionnaire));
    }

    pub async fn version_count(&self) -> usize {
        self.versions.read().await.len()
    }
}

#[async_trait]
impl QuestionnaireReader for InMemoryQuestionnaireReader {
    async fn find_by_version(
        &self,
        version_id: QuestionnaireVersionId,
    ) -> Result<Option<Arc<Questionnaire>>, DomainError> {
        let versions = self.versions.read().await;
        Ok(versions.get(&version_id).cloned())
    }
}
