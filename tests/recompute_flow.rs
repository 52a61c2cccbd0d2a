//! Integration tests for the submit-recompute-report flow.
//!
//! These tests drive the sample fixture through the public handlers:
//! 1. Answers are submitted (overwrite-all) and applicability is resolved
//! 2. Every dimension is scored for both strategies, plus the economics
//! 3. The report combines results, completion status, and advice
//! 4. Shared dimensions carry answers over to later assessments
//!
//! Uses in-memory adapters; no external dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use automation_fit::adapters::{
    load_fixture, Fixture, InMemoryAssessmentStore, InMemoryQuestionnaireReader,
    InMemorySharedAnswerStore,
};
use automation_fit::application::{
    AssessmentLocks, GetAssessmentReportHandler, GetAssessmentReportQuery,
    GetSharedAnswersHandler, GetSharedAnswersQuery, RecomputeAssessmentCommand,
    RecomputeAssessmentHandler, ResetSharedAnswersCommand, ResetSharedAnswersHandler,
    SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult,
};
use automation_fit::domain::advisory::{AdviceKind, AdvisoryLibrary, StrategyPreference};
use automation_fit::domain::assessment::{AnswerInput, DimensionStatus, MetricKey, Recommendation};
use automation_fit::domain::foundation::{AssessmentId, DimensionId, OptionId, QuestionId, Strategy};
use automation_fit::domain::scoring::{AssessmentEvaluator, ScoringPolicy};
use automation_fit::ports::{AnswerStore, ResultStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const FOLLOW_UP: QuestionId = QuestionId::new(303);
const DATA_STRUCTURE: QuestionId = QuestionId::new(401);
const IPA_PLATFORM: QuestionId = QuestionId::new(102);
const SHARED_PROCESSES: QuestionId = QuestionId::new(708);

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.map(|a| (a - expected).abs() < 1e-6).unwrap_or(false)
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/automation_assessment.yaml")
}

struct App {
    store: Arc<InMemoryAssessmentStore>,
    submit: SubmitAnswersHandler,
    recompute: Arc<RecomputeAssessmentHandler>,
    report: GetAssessmentReportHandler,
    shared_answers: GetSharedAnswersHandler,
    reset_shared: ResetSharedAnswersHandler,
    fixture: Fixture,
}

impl App {
    async fn new(policy: ScoringPolicy) -> Self {
        let fixture = load_fixture(fixture_path()).await.unwrap();
        let reader = Arc::new(InMemoryQuestionnaireReader::new());
        reader.insert(fixture.questionnaire.clone()).await;
        let store = Arc::new(InMemoryAssessmentStore::new());
        let shared = Arc::new(InMemorySharedAnswerStore::new());

        let recompute = Arc::new(RecomputeAssessmentHandler::new(
            reader.clone(),
            store.clone(),
            store.clone(),
            AssessmentEvaluator::new(policy),
            AssessmentLocks::new(),
        ));
        let submit = SubmitAnswersHandler::new(
            reader.clone(),
            store.clone(),
            shared.clone(),
            recompute.clone(),
        );
        let shared_answers = GetSharedAnswersHandler::new(reader.clone(), shared.clone());
        let reset_shared = ResetSharedAnswersHandler::new(shared);
        let report = GetAssessmentReportHandler::new(
            reader,
            store.clone(),
            store.clone(),
            Arc::new(AdvisoryLibrary::embedded().unwrap().clone()),
        );

        Self {
            store,
            submit,
            recompute,
            report,
            shared_answers,
            reset_shared,
            fixture,
        }
    }

    async fn submit(&self, id: AssessmentId, answers: Vec<AnswerInput>) -> SubmitAnswersResult {
        self.submit_with(id, answers, false).await
    }

    async fn submit_with(
        &self,
        id: AssessmentId,
        answers: Vec<AnswerInput>,
        use_shared_dimensions: bool,
    ) -> SubmitAnswersResult {
        self.submit
            .handle(SubmitAnswersCommand {
                assessment_id: id,
                questionnaire_version: self.fixture.questionnaire.version_id(),
                answers,
                use_shared_dimensions,
            })
            .await
            .unwrap()
    }

    /// Fixture answers without the questions of the given dimensions.
    fn answers_without(&self, dimensions: &[i64]) -> Vec<AnswerInput> {
        let questionnaire = &self.fixture.questionnaire;
        self.fixture
            .answers
            .iter()
            .filter(|a| {
                questionnaire
                    .question(a.question_id)
                    .map(|q| !dimensions.contains(&q.dimension_id.value()))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Fixture answers with one question's input replaced or removed.
    fn answers_with(&self, question_id: QuestionId, input: Option<AnswerInput>) -> Vec<AnswerInput> {
        let mut answers: Vec<AnswerInput> = self
            .fixture
            .answers
            .iter()
            .filter(|a| a.question_id != question_id)
            .cloned()
            .collect();
        answers.extend(input);
        answers
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn sample_assessment_recommends_ipa() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.fixture.answers.clone()).await;
    let results = &result.recomputation.results;

    let score = |dim: i64, strategy| {
        results
            .dimension_result(DimensionId::new(dim), strategy)
            .and_then(|r| r.score)
    };
    assert!(approx(score(1, Strategy::Rpa), 5.0));
    assert!(approx(score(2, Strategy::Rpa), 11.0 / 3.0));
    assert!(approx(score(3, Strategy::Rpa), 10.0 / 3.0));
    assert!(approx(score(3, Strategy::Ipa), 4.0));
    assert!(approx(score(4, Strategy::Ipa), 4.0));
    assert!(approx(score(5, Strategy::Ipa), 4.5));
    assert!(approx(score(7, Strategy::Rpa), 4.0));
    assert!(approx(score(7, Strategy::Ipa), 4.0));

    assert!(approx(results.total.rpa.score, 3.6));
    assert!(approx(results.total.ipa.score, 59.5 / 15.0));
    assert_eq!(results.total.recommendation, Recommendation::Ipa);
}

#[tokio::test]
async fn hidden_follow_up_is_cleared_and_stored() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.fixture.answers.clone()).await;

    assert_eq!(result.recomputation.resolution.changed, vec![FOLLOW_UP]);
    let sheet = app.store.load_answer_sheet(&id).await.unwrap().unwrap();
    let follow_up = sheet.answers_for(FOLLOW_UP).next().unwrap();
    assert!(!follow_up.is_applicable);
    assert!(!follow_up.has_value());
}

#[tokio::test]
async fn economic_metrics_are_derived() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.fixture.answers.clone()).await;
    let metric = |key| result.recomputation.results.metric(key).map(|m| m.value);

    assert!(approx(metric(MetricKey::AnnualFrequency), 4800.0));
    assert!(approx(metric(MetricKey::TimeSavedHours), 1040.0));
    assert!(approx(metric(MetricKey::FixedSetupCost), 15_500.0));
    assert!(approx(metric(MetricKey::AnnualVariableCost), 6_300.0));
    assert!(approx(metric(MetricKey::FteSaved), 1040.0 / 1700.0));
    let labor = 1040.0 / 1700.0 * 55_000.0;
    assert!(approx(metric(MetricKey::LaborBenefit), labor));
    assert!(approx(metric(MetricKey::Roi), (labor - 21_800.0) / 21_800.0));
}

#[tokio::test]
async fn shared_process_count_defaults_to_one() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.answers_with(SHARED_PROCESSES, None)).await;
    let fixed = result
        .recomputation
        .results
        .metric(MetricKey::FixedSetupCost)
        .map(|m| m.value);

    assert!(approx(fixed, 25_500.0));
}

#[tokio::test]
async fn missing_economic_input_leaves_economics_unscored() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.answers_with(QuestionId::new(705), None)).await;
    let results = &result.recomputation.results;

    assert!(results.metrics.is_empty());
    let economics = results
        .dimension_result(DimensionId::new(7), Strategy::Rpa)
        .unwrap();
    assert_eq!(economics.score, None);
    assert!(!economics.is_excluded);
    // Economics does not take part in the total.
    assert_eq!(results.total.recommendation, Recommendation::Ipa);
}

#[tokio::test]
async fn unstructured_data_excludes_rpa_from_total() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();
    let unstructured = AnswerInput::options(DATA_STRUCTURE, [OptionId::new(43)]);

    let result = app.submit(id, app.answers_with(DATA_STRUCTURE, Some(unstructured))).await;
    let total = result.recomputation.results.total;

    assert!(total.rpa.is_excluded);
    assert_eq!(total.rpa.score, None);
    assert_eq!(total.recommendation, Recommendation::Ipa);
}

#[tokio::test]
async fn filter_exclusion_stays_in_its_dimension() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();
    let no_platform = AnswerInput::options(IPA_PLATFORM, [OptionId::new(2)]);

    let result = app.submit(id, app.answers_with(IPA_PLATFORM, Some(no_platform))).await;
    let results = &result.recomputation.results;

    let platform = results
        .dimension_result(DimensionId::new(1), Strategy::Ipa)
        .unwrap();
    assert!(platform.is_attributed_exclusion());
    assert_eq!(platform.excluded_by, Some(IPA_PLATFORM));
    assert!(!results.total.ipa.is_excluded);
}

#[tokio::test]
async fn higher_threshold_turns_recommendation_neutral() {
    let policy = ScoringPolicy {
        recommendation_threshold: 0.5,
        ..ScoringPolicy::default()
    };
    let app = App::new(policy).await;
    let id = AssessmentId::new();

    let result = app.submit(id, app.fixture.answers.clone()).await;

    assert_eq!(
        result.recomputation.results.total.recommendation,
        Recommendation::Neutral
    );
}

#[tokio::test]
async fn recompute_after_submit_is_stable() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();
    let submitted = app.submit(id, app.fixture.answers.clone()).await;

    let recomputed = app
        .recompute
        .handle(RecomputeAssessmentCommand { assessment_id: id })
        .await
        .unwrap();

    assert!(recomputed.resolution.is_unchanged());
    assert_eq!(
        serde_json::to_string(&recomputed.results).unwrap(),
        serde_json::to_string(&submitted.recomputation.results).unwrap()
    );
    assert_eq!(
        app.store.load_results(&id).await.unwrap(),
        Some(recomputed.results)
    );
}

#[tokio::test]
async fn report_shows_status_advice_and_metrics() {
    let app = App::new(ScoringPolicy::default()).await;
    let id = AssessmentId::new();
    app.submit(id, app.fixture.answers.clone()).await;

    let report = app
        .report
        .handle(GetAssessmentReportQuery { assessment_id: id })
        .await
        .unwrap();

    assert_eq!(report.dimensions.len(), 7);
    let process = report.dimension(DimensionId::new(3)).unwrap();
    assert_eq!(process.status, DimensionStatus::Partial);
    let advice = process.advice.as_ref().unwrap();
    assert_eq!(
        advice.preference.as_ref().map(|p| p.preference),
        Some(StrategyPreference::Prefer(Strategy::Ipa))
    );
    assert!(matches!(advice.rpa.kind, AdviceKind::Scored(_)));
    assert!(!advice.rpa.text.is_empty());

    let organisation = report.dimension(DimensionId::new(2)).unwrap();
    assert_eq!(organisation.status, DimensionStatus::Complete);

    assert_eq!(report.metrics.len(), 7);
    assert_eq!(report.metrics["roi"].unit, "ratio");
    assert_eq!(report.metrics["fixed_setup_cost"].unit, "EUR");
}

#[tokio::test]
async fn parallel_assessments_do_not_interfere() {
    let app = Arc::new(App::new(ScoringPolicy::default()).await);
    let excluded = AnswerInput::options(DATA_STRUCTURE, [OptionId::new(43)]);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        let answers = if i % 2 == 0 {
            app.fixture.answers.clone()
        } else {
            app.answers_with(DATA_STRUCTURE, Some(excluded.clone()))
        };
        tasks.push(tokio::spawn(async move {
            let id = AssessmentId::new();
            app.submit(id, answers).await;
            (i, id)
        }));
    }

    for task in tasks {
        let (i, id) = task.await.unwrap();
        let results = app.store.load_results(&id).await.unwrap().unwrap();
        assert_eq!(results.total.rpa.is_excluded, i % 2 == 1);
    }
}

#[tokio::test]
async fn shared_dimensions_prefill_later_assessment() {
    let app = App::new(ScoringPolicy::default()).await;
    let version = app.fixture.questionnaire.version_id();
    let first = app
        .submit_with(AssessmentId::new(), app.fixture.answers.clone(), true)
        .await;
    let shared_dimensions = vec![DimensionId::new(1), DimensionId::new(2)];
    assert_eq!(first.saved_shared_dimensions, shared_dimensions);

    let saved = app
        .shared_answers
        .handle(GetSharedAnswersQuery {
            questionnaire_version: version,
        })
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);

    let second = app
        .submit_with(AssessmentId::new(), app.answers_without(&[1, 2]), true)
        .await;

    assert_eq!(second.prefilled_dimensions, shared_dimensions);
    assert_eq!(
        serde_json::to_string(&second.recomputation.results).unwrap(),
        serde_json::to_string(&first.recomputation.results).unwrap()
    );

    let reset = app
        .reset_shared
        .handle(ResetSharedAnswersCommand {
            questionnaire_version: version,
        })
        .await
        .unwrap();
    assert_eq!(reset.removed, 2);
    let third = app
        .submit_with(AssessmentId::new(), app.answers_without(&[1, 2]), true)
        .await;
    assert!(third.prefilled_dimensions.is_empty());
}
