//! Scoring configuration

use serde::Deserialize;

use crate::domain::applicability::DEFAULT_MAX_PASSES;
use crate::domain::scoring::{
    EconomicParameters, ScoringPolicy, DEFAULT_ANNUAL_COST_PER_FTE,
    DEFAULT_ANNUAL_WORK_HOURS_PER_FTE, DEFAULT_RECOMMENDATION_THRESHOLD,
};

use super::error::ValidationError;

/// Tunable constants of the scoring pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Working hours of one full-time equivalent per year
    #[serde(default = "default_annual_work_hours_per_fte")]
    pub annual_work_hours_per_fte: f64,

    /// Fully loaded cost of one full-time equivalent per year
    #[serde(default = "default_annual_cost_per_fte")]
    pub annual_cost_per_fte: f64,

    /// Minimum total score gap before one strategy is recommended
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,

    /// Upper bound on resolution passes for cyclic condition graphs
    #[serde(default = "default_max_resolution_passes")]
    pub max_resolution_passes: usize,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.annual_work_hours_per_fte.is_finite() && self.annual_work_hours_per_fte > 0.0) {
            return Err(ValidationError::InvalidWorkHours);
        }
        if !(self.annual_cost_per_fte.is_finite() && self.annual_cost_per_fte > 0.0) {
            return Err(ValidationError::InvalidFteCost);
        }
        if !(self.recommendation_threshold.is_finite() && self.recommendation_threshold >= 0.0) {
            return Err(ValidationError::InvalidThreshold);
        }
        if self.max_resolution_passes == 0 {
            return Err(ValidationError::InvalidMaxPasses);
        }
        Ok(())
    }

    /// Policy handed to the evaluator
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            economic: EconomicParameters {
                annual_work_hours_per_fte: self.annual_work_hours_per_fte,
                annual_cost_per_fte: self.annual_cost_per_fte,
            },
            recommendation_threshold: self.recommendation_threshold,
            max_resolution_passes: self.max_resolution_passes,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            annual_work_hours_per_fte: default_annual_work_hours_per_fte(),
            annual_cost_per_fte: default_annual_cost_per_fte(),
            recommendation_threshold: default_recommendation_threshold(),
            max_resolution_passes: default_max_resolution_passes(),
        }
    }
}

fn default_annual_work_hours_per_fte() -> f64 {
    DEFAULT_ANNUAL_WORK_HOURS_PER_FTE
}

fn default_annual_cost_per_fte() -> f64 {
    DEFAULT_ANNUAL_COST_PER_FTE
}

fn default_recommendation_threshold() -> f64 {
    DEFAULT_RECOMMENDATION_THRESHOLD
}

fn default_max_resolution_passes() -> usize {
    DEFAULT_MAX_PASSES
}
