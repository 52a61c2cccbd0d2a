//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    AssessmentLocks, AssessmentReport, DimensionReport, GetAssessmentReportError,
    GetAssessmentReportHandler, GetAssessmentReportQuery, GetSharedAnswersError,
    GetSharedAnswersHandler, GetSharedAnswersQuery, MetricValue, RecomputeAssessmentCommand,
    RecomputeAssessmentHandler, RecomputeAssessmentResult, RecomputeError,
    ResetSharedAnswersCommand, ResetSharedAnswersHandler, ResetSharedAnswersResult,
    SubmitAnswersCommand, SubmitAnswersError, SubmitAnswersHandler, SubmitAnswersResult,
};
