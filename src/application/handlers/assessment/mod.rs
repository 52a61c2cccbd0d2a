//! Assessment command and query handlers.

mod locks;

// Command handlers
mod recompute_assessment;
mod reset_shared_answers;
mod submit_answers;

// Query handlers
mod get_assessment_report;
mod get_shared_answers;

#[cfg(test)]
mod test_support;

pub use locks::AssessmentLocks;
pub use recompute_assessment::{
    RecomputeAssessmentCommand, RecomputeAssessmentHandler, RecomputeAssessmentResult,
    RecomputeError,
};
pub use reset_shared_answers::{
    ResetSharedAnswersCommand, ResetSharedAnswersHandler, ResetSharedAnswersResult,
};
pub use submit_answers::{
    SubmitAnswersCommand, SubmitAnswersError, SubmitAnswersHandler, SubmitAnswersResult,
};

// Query handlers
pub use get_assessment_report::{
    AssessmentReport, DimensionReport, GetAssessmentReportError, GetAssessmentReportHandler,
    GetAssessmentReportQuery, MetricValue,
};
pub use get_shared_answers::{GetSharedAnswersError, GetSharedAnswersHandler, GetSharedAnswersQuery};
