//! GetAssessmentReportHandler - Query handler for the assessment report.
//!
//! Combines stored answers, stored results, the questionnaire, and the
//! advisory library into one read model: totals, one entry per dimension
//! with results, completion status and advice, and the economic metrics.
//! Reads only; nothing is recomputed here.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::advisory::{AdvisoryLibrary, DimensionAdvice, DimensionAdvisor};
use crate::domain::assessment::{DimensionResult, DimensionStatus, ResultSet, TotalResult};
use crate::domain::foundation::{
    AssessmentId, DimensionId, DomainError, ErrorCode, QuestionnaireVersionId, Strategy,
    Timestamp,
};
use crate::domain::questionnaire::CalculationMethod;
use crate::ports::{AnswerStore, QuestionnaireReader, ResultStore};

/// Query for the report of one assessment.
#[derive(Debug, Clone)]
pub struct GetAssessmentReportQuery {
    pub assessment_id: AssessmentId,
}

/// Read model returned by the report query.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub assessment_id: AssessmentId,
    pub questionnaire_version: QuestionnaireVersionId,
    pub questionnaire_name: String,
    /// When the answers were last submitted.
    pub answers_updated_at: Timestamp,
    /// `None` until a recomputation has been committed.
    pub total: Option<TotalResult>,
    pub dimensions: Vec<DimensionReport>,
    /// Economic metrics keyed by name.
    pub metrics: BTreeMap<String, MetricValue>,
}

impl AssessmentReport {
    pub fn dimension(&self, dimension_id: DimensionId) -> Option<&DimensionReport> {
        self.dimensions.iter().find(|d| d.dimension_id == dimension_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionReport {
    pub dimension_id: DimensionId,
    pub code: String,
    pub name: String,
    pub calculation_method: CalculationMethod,
    pub participates_in_total: bool,
    pub status: DimensionStatus,
    pub rpa: Option<DimensionResult>,
    pub ipa: Option<DimensionResult>,
    pub advice: Option<DimensionAdvice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub value: f64,
    pub unit: String,
}

/// Error type for the report query.
#[derive(Debug, Clone)]
pub enum GetAssessmentReportError {
    /// No answers stored for the assessment.
    NotFound(AssessmentId),
    /// The stored answers refer to an unknown questionnaire version.
    QuestionnaireNotFound(QuestionnaireVersionId),
    /// Infrastructure error.
    Infrastructure(DomainError),
}

impl std::fmt::Display for GetAssessmentReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetAssessmentReportError::NotFound(id) => write!(f, "Assessment not found: {}", id),
            GetAssessmentReportError::QuestionnaireNotFound(version) => {
                write!(f, "Questionnaire version not found: {}", version)
            }
            GetAssessmentReportError::Infrastructure(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetAssessmentReportError {}

impl From<DomainError> for GetAssessmentReportError {
    fn from(err: DomainError) -> Self {
        GetAssessmentReportError::Infrastructure(err)
    }
}

impl From<GetAssessmentReportError> for DomainError {
    fn from(err: GetAssessmentReportError) -> Self {
        match err {
            GetAssessmentReportError::NotFound(_) => {
                DomainError::new(ErrorCode::AssessmentNotFound, err.to_string())
            }
            GetAssessmentReportError::QuestionnaireNotFound(_) => {
                DomainError::new(ErrorCode::QuestionnaireNotFound, err.to_string())
            }
            GetAssessmentReportError::Infrastructure(inner) => inner,
        }
    }
}

/// Handler for the assessment report.
pub struct GetAssessmentReportHandler {
    questionnaires: Arc<dyn QuestionnaireReader>,
    answers: Arc<dyn AnswerStore>,
    results: Arc<dyn ResultStore>,
    library: Arc<AdvisoryLibrary>,
}

impl GetAssessmentReportHandler {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireReader>,
        answers: Arc<dyn AnswerStore>,
        results: Arc<dyn ResultStore>,
        library: Arc<AdvisoryLibrary>,
    ) -> Self {
        Self {
            questionnaires,
            answers,
            results,
            library,
        }
    }

    pub async fn handle(
        &self,
        query: GetAssessmentReportQuery,
    ) -> Result<AssessmentReport, GetAssessmentReportError> {
        let sheet = self
            .answers
            .load_answer_sheet(&query.assessment_id)
            .await?
            .ok_or(GetAssessmentReportError::NotFound(query.assessment_id))?;
        let questionnaire = self
            .questionnaires
            .find_by_version(sheet.questionnaire_version)
            .await?
            .ok_or(GetAssessmentReportError::QuestionnaireNotFound(sheet.questionnaire_version))?;
        let results = self.results.load_results(&query.assessment_id).await?;

        let advisor = DimensionAdvisor::new(&self.library);
        let dimensions = questionnaire
            .dimensions()
            .iter()
            .map(|dimension| {
                let rpa = Self::result_for(results.as_ref(), dimension.id, Strategy::Rpa);
                let ipa = Self::result_for(results.as_ref(), dimension.id, Strategy::Ipa);
                let advice = match (&rpa, &ipa) {
                    (Some(rpa), Some(ipa)) => Some(advisor.advise(dimension, rpa, ipa)),
                    _ => None,
                };
                DimensionReport {
                    dimension_id: dimension.id,
                    code: dimension.code.clone(),
                    name: dimension.name.clone(),
                    calculation_method: dimension.calculation_method,
                    participates_in_total: dimension.participates_in_total,
                    status: DimensionStatus::of(&questionnaire, dimension.id, &sheet.answers),
                    rpa,
                    ipa,
                    advice,
                }
            })
            .collect();

        let metrics = results
            .as_ref()
            .map(|r| {
                r.metrics
                    .iter()
                    .map(|m| {
                        (
                            m.key.as_str().to_string(),
                            MetricValue {
                                value: m.value,
                                unit: m.unit.clone(),
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(AssessmentReport {
            assessment_id: query.assessment_id,
            questionnaire_version: sheet.questionnaire_version,
            questionnaire_name: questionnaire.name().to_string(),
            answers_updated_at: sheet.updated_at,
            total: results.as_ref().map(|r| r.total),
            dimensions,
            metrics,
        })
    }

    fn result_for(
        results: Option<&ResultSet>,
        dimension_id: DimensionId,
        strategy: Strategy,
    ) -> Option<DimensionResult> {
        results.and_then(|r| r.dimension_result(dimension_id, strategy).copied())
    }
}
