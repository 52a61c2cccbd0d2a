//! Result store port - derived results of a recomputation.
//!
//! # Atomicity
//!
//! `commit_recomputation` replaces the resolved answers and every result
//! row of one assessment in a single unit. Implementations must either
//! apply all of it or leave the previous state untouched; readers never
//! observe a mix of old and new rows.

use async_trait::async_trait;

use crate::domain::assessment::{AnswerSheet, ResultSet};
use crate::domain::foundation::{AssessmentId, DomainError};

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Atomically stores resolved answers together with their results.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure, with nothing changed
    async fn commit_recomputation(
        &self,
        sheet: AnswerSheet,
        results: ResultSet,
    ) -> Result<(), DomainError>;

    /// Reads the current results of an assessment.
    ///
    /// Returns `None` if no recomputation has been committed yet.
    async fn load_results(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<ResultSet>, DomainError>;
}
