//! In-Memory Assessment Store
//!
//! Implements both `AnswerStore` and `ResultStore` over one map, so a
//! recomputation commit swaps answers and results under a single write
//! lock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::{AnswerSheet, ResultSet};
use crate::domain::foundation::{AssessmentId, DomainError};
use crate::ports::{AnswerStore, ResultStore};

#[derive(Debug, Clone, Default)]
struct StoredAssessment {
    sheet: Option<AnswerSheet>,
    results: Option<ResultSet>,
}

/// In-memory storage for answers and derived results.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentStore {
    assessments: Arc<RwLock<HashMap<AssessmentId, StoredAssessment>>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.assessments.write().await.clear();
    }

    pub async fn assessment_count(&self) -> usize {
        self.assessments.read().await.len()
    }
}

#[async_trait]
impl AnswerStore for InMemoryAssessmentStore {
    async fn load_answer_sheet(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<AnswerSheet>, DomainError> {
        let assessments = self.assessments.read().await;
        Ok(assessments
            .get(assessment_id)
            .and_then(|stored| stored.sheet.clone()))
    }

    async fn replace_answers(&self, sheet: AnswerSheet) -> Result<(), DomainError> {
        let assessment_id = sheet.assessment_id;
        let mut assessments = self.assessments.write().await;
        assessments.entry(assessment_id).or_default().sheet = Some(sheet);
        Ok(())
    }
}

#[async_trait]
impl ResultStore for InMemoryAssessmentStore {
    async fn commit_recomputation(
        &self,
        sheet: AnswerSheet,
        results: ResultSet,
    ) -> Result<(), DomainError> {
        let mut assessments = self.assessments.write().await;
        assessments.insert(
            sheet.assessment_id,
            StoredAssessment {
                sheet: Some(sheet),
                results: Some(results),
            },
        );
        Ok(())
    }

    async fn load_results(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<ResultSet>, DomainError> {
        let assessments = self.assessments.read().await;
        Ok(assessments
            .get(assessment_id)
            .and_then(|stored| stored.results.clone()))
    }
}
