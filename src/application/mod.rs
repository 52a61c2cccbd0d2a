//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (submit, recompute, reset shared answers) write; the report and
//! shared-answer queries only read.

pub mod handlers;

pub use handlers::{
    // Commands
    RecomputeAssessmentCommand, RecomputeAssessmentHandler, RecomputeAssessmentResult,
    RecomputeError, ResetSharedAnswersCommand, ResetSharedAnswersHandler,
    ResetSharedAnswersResult, SubmitAnswersCommand, SubmitAnswersError, SubmitAnswersHandler,
    SubmitAnswersResult,
    // Queries
    AssessmentReport, DimensionReport, GetAssessmentReportError, GetAssessmentReportHandler,
    GetAssessmentReportQuery, GetSharedAnswersError, GetSharedAnswersHandler,
    GetSharedAnswersQuery, MetricValue,
    // Concurrency
    AssessmentLocks,
};
