//! RecomputeAssessmentHandler - Command handler that re-derives all results
//! of one assessment from its stored answers.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::applicability::{ApplicabilityError, ResolutionReport};
use crate::domain::assessment::{AnswerSheet, ResultSet};
use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode, QuestionnaireVersionId};
use crate::domain::scoring::AssessmentEvaluator;
use crate::ports::{AnswerStore, QuestionnaireReader, ResultStore};

use super::AssessmentLocks;

/// Command to recompute one assessment.
#[derive(Debug, Clone)]
pub struct RecomputeAssessmentCommand {
    pub assessment_id: AssessmentId,
}

/// Result of a committed recomputation.
#[derive(Debug, Clone)]
pub struct RecomputeAssessmentResult {
    /// Answers after applicability resolution, as committed.
    pub sheet: AnswerSheet,
    pub resolution: ResolutionReport,
    pub results: ResultSet,
}

#[derive(Debug, Error)]
pub enum RecomputeError {
    #[error("Assessment not found: {0}")]
    AssessmentNotFound(AssessmentId),

    #[error("Questionnaire version not found: {0}")]
    QuestionnaireNotFound(QuestionnaireVersionId),

    #[error(transparent)]
    Applicability(#[from] ApplicabilityError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<RecomputeError> for DomainError {
    fn from(err: RecomputeError) -> Self {
        match err {
            RecomputeError::AssessmentNotFound(id) => {
                DomainError::new(ErrorCode::AssessmentNotFound, format!("Assessment not found: {}", id))
            }
            RecomputeError::QuestionnaireNotFound(version) => DomainError::new(
                ErrorCode::QuestionnaireNotFound,
                format!("Questionnaire version not found: {}", version),
            ),
            RecomputeError::Applicability(inner) => inner.into(),
            RecomputeError::Domain(inner) => inner,
        }
    }
}

/// Handler for recomputing assessments.
///
/// Holds the per-assessment lock for the whole load-evaluate-commit
/// sequence, so concurrent recomputations of one assessment never
/// interleave.
pub struct RecomputeAssessmentHandler {
    questionnaires: Arc<dyn QuestionnaireReader>,
    answers: Arc<dyn AnswerStore>,
    results: Arc<dyn ResultStore>,
    evaluator: AssessmentEvaluator,
    locks: AssessmentLocks,
}

impl RecomputeAssessmentHandler {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireReader>,
        answers: Arc<dyn AnswerStore>,
        results: Arc<dyn ResultStore>,
        evaluator: AssessmentEvaluator,
        locks: AssessmentLocks,
    ) -> Self {
        Self {
            questionnaires,
            answers,
            results,
            evaluator,
            locks,
        }
    }

    pub fn locks(&self) -> &AssessmentLocks {
        &self.locks
    }

    pub async fn handle(
        &self,
        cmd: RecomputeAssessmentCommand,
    ) -> Result<RecomputeAssessmentResult, RecomputeError> {
        let _guard = self.locks.acquire(cmd.assessment_id).await;
        self.recompute_locked(cmd.assessment_id).await
    }

    /// Runs the recomputation. The caller must hold the assessment lock.
    pub(super) async fn recompute_locked(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<RecomputeAssessmentResult, RecomputeError> {
        // 1. Load stored answers
        let stored = self
            .answers
            .load_answer_sheet(&assessment_id)
            .await?
            .ok_or(RecomputeError::AssessmentNotFound(assessment_id))?;

        // 2. Load the questionnaire version they belong to
        let questionnaire = self
            .questionnaires
            .find_by_version(stored.questionnaire_version)
            .await?
            .ok_or(RecomputeError::QuestionnaireNotFound(stored.questionnaire_version))?;

        // 3. Resolve and score a working copy
        let mut sheet = stored;
        let evaluation = match self.evaluator.evaluate(&questionnaire, &mut sheet.answers) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(assessment_id = %assessment_id, error = %err, "Recomputation aborted");
                return Err(err.into());
            }
        };
        debug!(
            assessment_id = %assessment_id,
            passes = evaluation.resolution.passes,
            changed = evaluation.resolution.changed.len(),
            "Applicability resolved"
        );

        // 4. Commit answers and results as one unit; submission time is kept
        self.results
            .commit_recomputation(sheet.clone(), evaluation.results.clone())
            .await?;

        info!(
            assessment_id = %assessment_id,
            recommendation = %evaluation.results.total.recommendation,
            "Assessment recomputed"
        );

        Ok(RecomputeAssessmentResult {
            sheet,
            resolution: evaluation.resolution,
            results: evaluation.results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixture::Fixture;
    use crate::adapters::memory::{InMemoryAssessmentStore, InMemoryQuestionnaireReader};
    use crate::application::handlers::assessment::test_support::*;
    use crate::domain::assessment::{validate_inputs, Answer, AnswerInput, Recommendation};
    use crate::domain::foundation::{DimensionId, QuestionId, Strategy};
    use crate::domain::scoring::ScoringPolicy;
    use async_trait::async_trait;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    /// Result store whose commits always fail.
    struct FailingResultStore;

    #[async_trait]
    impl ResultStore for FailingResultStore {
        async fn commit_recomputation(
            &self,
            _sheet: AnswerSheet,
            _results: ResultSet,
        ) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated commit failure"))
        }

        async fn load_results(
            &self,
            _assessment_id: &AssessmentId,
        ) -> Result<Option<ResultSet>, DomainError> {
            Ok(None)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    async fn handler(store: Arc<InMemoryAssessmentStore>) -> RecomputeAssessmentHandler {
        RecomputeAssessmentHandler::new(
            reader().await,
            store.clone(),
            store,
            AssessmentEvaluator::default(),
            AssessmentLocks::new(),
        )
    }

    async fn seed(store: &InMemoryAssessmentStore, inputs: &[AnswerInput]) -> AssessmentId {
        let id = AssessmentId::new();
        let answers = validate_inputs(&questionnaire(), inputs).unwrap();
        store
            .replace_answers(AnswerSheet::new(id, VERSION, answers))
            .await
            .unwrap();
        id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn recompute_commits_results() {
        let store = store();
        let id = seed(&store, &documented_inputs()).await;
        let handler = handler(store.clone()).await;

        let result = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap();

        assert_eq!(result.results.total.recommendation, Recommendation::Neutral);
        assert_eq!(result.results.total.rpa.score, Some(4.5));
        assert_eq!(store.load_results(&id).await.unwrap(), Some(result.results));
    }

    #[tokio::test]
    async fn recompute_stores_resolved_answers() {
        let store = store();
        let id = seed(&store, &undocumented_inputs()).await;
        let handler = handler(store.clone()).await;

        let result = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap();

        assert_eq!(result.resolution.changed, vec![COMPLETENESS]);
        let stored = store.load_answer_sheet(&id).await.unwrap().unwrap();
        let follow_up = stored.answers_for(COMPLETENESS).next().unwrap();
        assert!(!follow_up.is_applicable);
        assert!(!follow_up.has_value());
    }

    #[tokio::test]
    async fn exclusion_flows_into_recommendation() {
        let store = store();
        let id = seed(&store, &undocumented_inputs()).await;
        let handler = handler(store).await;

        let result = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap();

        let process = result
            .results
            .dimension_result(DimensionId::new(2), Strategy::Rpa)
            .unwrap();
        assert!(process.is_attributed_exclusion());
        assert_eq!(process.excluded_by, Some(DOCUMENTED));
        assert_eq!(result.results.total.recommendation, Recommendation::Ipa);
        assert_eq!(result.results.total.ipa.score, Some(2.0));
    }

    #[tokio::test]
    async fn recompute_twice_is_stable() {
        let store = store();
        let id = seed(&store, &undocumented_inputs()).await;
        let handler = handler(store.clone()).await;
        let cmd = RecomputeAssessmentCommand { assessment_id: id };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(second.resolution.is_unchanged());
        assert_eq!(first.results, second.results);
        assert_eq!(first.sheet.answers, second.sheet.answers);
    }

    #[tokio::test]
    async fn recompute_keeps_submission_time() {
        let store = store();
        let id = seed(&store, &undocumented_inputs()).await;
        let submitted_at = store.load_answer_sheet(&id).await.unwrap().unwrap().updated_at;
        let handler = handler(store.clone()).await;

        let result = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap();

        assert_eq!(result.sheet.updated_at, submitted_at);
        let stored = store.load_answer_sheet(&id).await.unwrap().unwrap();
        assert_eq!(stored.updated_at, submitted_at);
    }

    #[tokio::test]
    async fn unknown_assessment_is_not_found() {
        let handler = handler(store()).await;
        let id = AssessmentId::new();

        let err = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, RecomputeError::AssessmentNotFound(found) if found == id));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::AssessmentNotFound);
    }

    #[tokio::test]
    async fn unknown_questionnaire_version_is_reported() {
        let store = store();
        let id = AssessmentId::new();
        let missing = QuestionnaireVersionId::new(42);
        store
            .replace_answers(AnswerSheet::new(id, missing, vec![]))
            .await
            .unwrap();
        let handler = handler(store).await;

        let err = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, RecomputeError::QuestionnaireNotFound(v) if v == missing));
    }

    #[tokio::test]
    async fn failed_commit_leaves_previous_state() {
        let store = store();
        let id = seed(&store, &undocumented_inputs()).await;
        let before = store.load_answer_sheet(&id).await.unwrap();
        let handler = RecomputeAssessmentHandler::new(
            reader().await,
            store.clone(),
            Arc::new(FailingResultStore),
            AssessmentEvaluator::default(),
            AssessmentLocks::new(),
        );

        let err = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, RecomputeError::Domain(ref e) if e.code == ErrorCode::DatabaseError));
        assert_eq!(store.load_answer_sheet(&id).await.unwrap(), before);
        assert!(store.load_results(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_convergence_commits_nothing() {
        const CYCLIC: &str = r#"
version_id: 2
name: Cyclic
dimensions:
  - { id: 1, code: "3", name: Process, sort_order: 1, calculation_method: mean }
scales:
  - key: yes_no
    label: Yes/No
    options:
      - { id: 1, code: "YES", label: "Yes", sort_order: 1 }
      - { id: 2, code: "NO", label: "No", sort_order: 2 }
questions:
  - id: 1
    dimension_id: 1
    code: "3.1"
    text: "First"
    question_type: single_choice
    scale: yes_no
    conditions: [{ parent_question_id: 2, required_option_id: 1 }]
  - id: 2
    dimension_id: 1
    code: "3.2"
    text: "Second"
    question_type: single_choice
    scale: yes_no
    conditions: [{ parent_question_id: 1, required_option_id: 1 }]
"#;
        let cyclic = Fixture::from_yaml(CYCLIC).unwrap().questionnaire;
        let version = cyclic.version_id();
        let reader = InMemoryQuestionnaireReader::new();
        reader.insert(cyclic).await;

        // Stored flags disagree with the stored selection.
        let mut first = Answer::option(QuestionId::new(1), YES);
        first.is_applicable = false;
        let second = Answer::option(QuestionId::new(2), YES);
        let store = store();
        let id = AssessmentId::new();
        store
            .replace_answers(AnswerSheet::new(id, version, vec![first, second]))
            .await
            .unwrap();

        let policy = ScoringPolicy {
            max_resolution_passes: 1,
            ..ScoringPolicy::default()
        };
        let handler = RecomputeAssessmentHandler::new(
            Arc::new(reader),
            store.clone(),
            store.clone(),
            AssessmentEvaluator::new(policy),
            AssessmentLocks::new(),
        );

        let err = handler
            .handle(RecomputeAssessmentCommand { assessment_id: id })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecomputeError::Applicability(ApplicabilityError::NotConverged { passes: 1, .. })
        ));
        assert!(store.load_results(&id).await.unwrap().is_none());
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::ApplicabilityNotConverged);
    }
}
