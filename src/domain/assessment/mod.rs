//! Assessment module - answers of one response and the results derived from them.

mod answer;
mod results;
mod shared;
mod status;

pub use answer::{validate_inputs, Answer, AnswerInput, AnswerSheet, AnswerValidationError};
pub use results::{
    DimensionResult, EconomicMetric, MetricKey, Recommendation, ResultSet, StrategyTotal, TotalResult,
};
pub use shared::{prefill_inputs, SharedDimensionAnswers};
pub use status::DimensionStatus;
