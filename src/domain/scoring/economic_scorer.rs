//! Economic Scorer - return on investment of automating one process.
//!
//! # Algorithm
//!
//! Seven numeric answers describe cost and effort. With the hourly rate
//! derived from the annual cost and annual working hours of one FTE:
//!
//! ```text
//! annual_frequency     = monthly_frequency * 12
//! time_saved_hours     = (manual_minutes - residual_minutes) / 60 * annual_frequency
//! fte_saved            = time_saved_hours / annual_work_hours_per_fte
//! labor_benefit        = fte_saved * annual_cost_per_fte
//! fixed_setup_cost     = setup_cost / shared_processes + implementation_hours * hourly_rate
//! annual_variable_cost = annual_run_cost + monthly_maintenance_hours * 12 * hourly_rate
//! roi                  = (labor_benefit - total_cost) / total_cost
//! ```
//!
//! ROI is banded onto 1-5 and the same score is used for both strategies.
//!
//! # Edge Cases
//!
//! - Any missing required input: no score, no metrics, never excluded
//! - Shared process count defaults to 1 and is floored at 1
//! - ROI is 0 when total cost is not positive

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::assessment::{DimensionResult, EconomicMetric, MetricKey};
use crate::domain::foundation::Strategy;
use crate::domain::questionnaire::{DimensionDefinition, EconomicInput, Questionnaire};

use super::ApplicableAnswers;

/// Default annual working hours of one full-time employee.
pub const DEFAULT_ANNUAL_WORK_HOURS_PER_FTE: f64 = 1700.0;

/// Default fully loaded annual cost of one full-time employee, in EUR.
pub const DEFAULT_ANNUAL_COST_PER_FTE: f64 = 55_000.0;

/// ROI band upper bounds (exclusive) and their scores.
const ROI_BANDS: [(f64, f64); 4] = [(0.05, 1.0), (0.20, 2.0), (0.50, 3.0), (1.00, 4.0)];
const TOP_BAND_SCORE: f64 = 5.0;

/// Labour cost constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicParameters {
    pub annual_work_hours_per_fte: f64,
    pub annual_cost_per_fte: f64,
}

impl Default for EconomicParameters {
    fn default() -> Self {
        Self {
            annual_work_hours_per_fte: DEFAULT_ANNUAL_WORK_HOURS_PER_FTE,
            annual_cost_per_fte: DEFAULT_ANNUAL_COST_PER_FTE,
        }
    }
}

impl EconomicParameters {
    /// Cost of one working hour, in EUR.
    pub fn hourly_rate(&self) -> f64 {
        self.annual_cost_per_fte / self.annual_work_hours_per_fte
    }
}

/// Numeric answers the calculation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicInputs {
    pub setup_cost: f64,
    pub implementation_hours: f64,
    pub annual_run_cost: f64,
    pub monthly_maintenance_hours: f64,
    pub monthly_frequency: f64,
    pub manual_minutes_per_run: f64,
    pub residual_minutes_per_run: f64,
    pub shared_process_count: f64,
}

impl EconomicInputs {
    /// Collects inputs from applicable answers of the bound questions.
    ///
    /// Returns the missing required inputs when any is unanswered.
    pub fn collect(
        questionnaire: &Questionnaire,
        answers: &ApplicableAnswers,
    ) -> Result<Self, Vec<EconomicInput>> {
        let value = |input: EconomicInput| {
            questionnaire
                .economic_question(input)
                .and_then(|q| answers.number(q.id))
        };

        let missing: Vec<EconomicInput> = EconomicInput::REQUIRED
            .iter()
            .copied()
            .filter(|&input| value(input).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let required = |input: EconomicInput| value(input).unwrap_or_default();
        Ok(Self {
            setup_cost: required(EconomicInput::SetupCost),
            implementation_hours: required(EconomicInput::ImplementationHours),
            annual_run_cost: required(EconomicInput::AnnualRunCost),
            monthly_maintenance_hours: required(EconomicInput::MonthlyMaintenanceHours),
            monthly_frequency: required(EconomicInput::MonthlyFrequency),
            manual_minutes_per_run: required(EconomicInput::ManualMinutesPerRun),
            residual_minutes_per_run: required(EconomicInput::ResidualMinutesPerRun),
            shared_process_count: value(EconomicInput::SharedProcessCount).unwrap_or(1.0),
        })
    }
}

/// Derived quantities of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicBreakdown {
    pub roi: f64,
    pub labor_benefit: f64,
    pub fte_saved: f64,
    pub fixed_setup_cost: f64,
    pub annual_variable_cost: f64,
    pub annual_frequency: f64,
    pub time_saved_hours: f64,
}

impl EconomicBreakdown {
    pub fn value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Roi => self.roi,
            MetricKey::LaborBenefit => self.labor_benefit,
            MetricKey::FteSaved => self.fte_saved,
            MetricKey::FixedSetupCost => self.fixed_setup_cost,
            MetricKey::AnnualVariableCost => self.annual_variable_cost,
            MetricKey::AnnualFrequency => self.annual_frequency,
            MetricKey::TimeSavedHours => self.time_saved_hours,
        }
    }

    /// All seven metrics in emission order, regardless of sign.
    pub fn metrics(&self) -> Vec<EconomicMetric> {
        MetricKey::ALL
            .iter()
            .map(|&key| EconomicMetric::new(key, self.value(key)))
            .collect()
    }
}

/// Results of the economic dimension for both strategies plus metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomicOutcome {
    pub results: Vec<DimensionResult>,
    pub metrics: Vec<EconomicMetric>,
}

/// Stateless scorer for the economic dimension.
pub struct EconomicScorer;

impl EconomicScorer {
    /// Scores the economic dimension from applicable numeric answers.
    pub fn score(
        questionnaire: &Questionnaire,
        dimension: &DimensionDefinition,
        answers: &ApplicableAnswers,
        parameters: &EconomicParameters,
    ) -> EconomicOutcome {
        let (score, metrics) = match EconomicInputs::collect(questionnaire, answers) {
            Ok(inputs) => {
                let breakdown = Self::calculate(&inputs, parameters);
                (Some(Self::roi_band(breakdown.roi)), breakdown.metrics())
            }
            Err(missing) => {
                debug!(
                    dimension = %dimension.code,
                    missing = ?missing,
                    "Economic inputs incomplete, no score"
                );
                (None, Vec::new())
            }
        };

        EconomicOutcome {
            results: Strategy::ALL
                .iter()
                .map(|&strategy| DimensionResult::scored(dimension.id, strategy, score))
                .collect(),
            metrics,
        }
    }

    /// Derives all economic quantities from complete inputs.
    pub fn calculate(inputs: &EconomicInputs, parameters: &EconomicParameters) -> EconomicBreakdown {
        let hourly_rate = parameters.hourly_rate();
        let shared_processes = inputs.shared_process_count.max(1.0);

        let annual_frequency = inputs.monthly_frequency * 12.0;
        let current_total_hours = inputs.manual_minutes_per_run / 60.0 * annual_frequency;
        let post_total_hours = inputs.residual_minutes_per_run / 60.0 * annual_frequency;
        let time_saved_hours = current_total_hours - post_total_hours;

        let fte_saved = time_saved_hours / parameters.annual_work_hours_per_fte;
        let labor_benefit = fte_saved * parameters.annual_cost_per_fte;

        let fixed_setup_cost =
            inputs.setup_cost / shared_processes + inputs.implementation_hours * hourly_rate;
        let annual_variable_cost =
            inputs.annual_run_cost + inputs.monthly_maintenance_hours * 12.0 * hourly_rate;
        let total_cost = fixed_setup_cost + annual_variable_cost;

        let roi = if total_cost > 0.0 {
            (labor_benefit - total_cost) / total_cost
        } else {
            0.0
        };

        EconomicBreakdown {
            roi,
            labor_benefit,
            fte_saved,
            fixed_setup_cost,
            annual_variable_cost,
            annual_frequency,
            time_saved_hours,
        }
    }

    /// Maps ROI onto the 1-5 band. Negative ROI lands in the lowest band.
    pub fn roi_band(roi: f64) -> f64 {
        ROI_BANDS
            .iter()
            .find(|(upper, _)| roi < *upper)
            .map(|(_, score)| *score)
            .unwrap_or(TOP_BAND_SCORE)
    }
}
