//! Scoring module - from resolved answers to dimension and total results.
//!
//! # Components
//!
//! - `DimensionScorer` - Mean score per dimension and strategy with exclusion veto
//! - `EconomicScorer` - ROI metrics and ROI band for the economic dimension
//! - `TotalAggregator` - Strategy totals and the recommendation
//! - `AssessmentEvaluator` - Pipeline running resolution and all scorers

mod applicable_answers;
mod dimension_scorer;
mod economic_scorer;
mod evaluator;
mod total_aggregator;

pub use applicable_answers::ApplicableAnswers;
pub use dimension_scorer::DimensionScorer;
pub use economic_scorer::{
    EconomicBreakdown, EconomicInputs, EconomicOutcome, EconomicParameters, EconomicScorer,
    DEFAULT_ANNUAL_COST_PER_FTE, DEFAULT_ANNUAL_WORK_HOURS_PER_FTE,
};
pub use evaluator::{AssessmentEvaluator, Evaluation, ScoringPolicy};
pub use total_aggregator::{TotalAggregator, DEFAULT_RECOMMENDATION_THRESHOLD};
