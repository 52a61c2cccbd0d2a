//! Derived result rows of one recomputation.
//!
//! Results carry no timestamps or generated ids; recomputing unchanged
//! answers yields an identical `ResultSet`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DimensionId, QuestionId, Strategy};

/// Score of one dimension for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension_id: DimensionId,
    pub strategy: Strategy,
    /// Mean score, `None` when nothing in the dimension was scorable.
    pub score: Option<f64>,
    pub is_excluded: bool,
    /// Question whose answer vetoed the dimension.
    pub excluded_by: Option<QuestionId>,
}

impl DimensionResult {
    pub fn scored(dimension_id: DimensionId, strategy: Strategy, score: Option<f64>) -> Self {
        Self {
            dimension_id,
            strategy,
            score,
            is_excluded: false,
            excluded_by: None,
        }
    }

    pub fn excluded(dimension_id: DimensionId, strategy: Strategy, question_id: QuestionId) -> Self {
        Self {
            dimension_id,
            strategy,
            score: None,
            is_excluded: true,
            excluded_by: Some(question_id),
        }
    }

    /// Exclusion that counts at assessment level.
    pub fn is_attributed_exclusion(&self) -> bool {
        self.is_excluded && self.excluded_by.is_some()
    }
}

/// Overall verdict between the two strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Rpa,
    Ipa,
    Neutral,
    Neither,
    Incomplete,
}

impl Recommendation {
    pub fn prefer(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Rpa => Recommendation::Rpa,
            Strategy::Ipa => Recommendation::Ipa,
        }
    }

    /// The recommended strategy, if one is preferred.
    pub fn preferred(&self) -> Option<Strategy> {
        match self {
            Recommendation::Rpa => Some(Strategy::Rpa),
            Recommendation::Ipa => Some(Strategy::Ipa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Rpa => "rpa",
            Recommendation::Ipa => "ipa",
            Recommendation::Neutral => "neutral",
            Recommendation::Neither => "neither",
            Recommendation::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total of one strategy across participating dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyTotal {
    pub strategy: Strategy,
    pub score: Option<f64>,
    pub is_excluded: bool,
}

/// Assessment-level result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalResult {
    pub rpa: StrategyTotal,
    pub ipa: StrategyTotal,
    pub recommendation: Recommendation,
}

impl TotalResult {
    pub fn for_strategy(&self, strategy: Strategy) -> &StrategyTotal {
        match strategy {
            Strategy::Rpa => &self.rpa,
            Strategy::Ipa => &self.ipa,
        }
    }
}

/// Names of derived economic quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Roi,
    LaborBenefit,
    FteSaved,
    FixedSetupCost,
    AnnualVariableCost,
    AnnualFrequency,
    TimeSavedHours,
}

impl MetricKey {
    /// Keys in the order metrics are emitted.
    pub const ALL: [MetricKey; 7] = [
        MetricKey::Roi,
        MetricKey::LaborBenefit,
        MetricKey::FteSaved,
        MetricKey::FixedSetupCost,
        MetricKey::AnnualVariableCost,
        MetricKey::AnnualFrequency,
        MetricKey::TimeSavedHours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Roi => "roi",
            MetricKey::LaborBenefit => "labor_benefit",
            MetricKey::FteSaved => "fte_saved",
            MetricKey::FixedSetupCost => "fixed_setup_cost",
            MetricKey::AnnualVariableCost => "annual_variable_cost",
            MetricKey::AnnualFrequency => "annual_frequency",
            MetricKey::TimeSavedHours => "time_saved_hours",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKey::Roi => "ratio",
            MetricKey::LaborBenefit | MetricKey::FixedSetupCost | MetricKey::AnnualVariableCost => "EUR",
            MetricKey::FteSaved => "FTE",
            MetricKey::AnnualFrequency => "count",
            MetricKey::TimeSavedHours => "hours",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named economic quantity derived from numeric answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicMetric {
    pub key: MetricKey,
    pub value: f64,
    pub unit: String,
}

impl EconomicMetric {
    pub fn new(key: MetricKey, value: f64) -> Self {
        Self {
            key,
            value,
            unit: key.unit().to_string(),
        }
    }
}

/// Everything one recomputation produces for an assessment.
///
/// Dimension results are ordered by dimension display order, then strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub dimension_results: Vec<DimensionResult>,
    pub total: TotalResult,
    pub metrics: Vec<EconomicMetric>,
}

impl ResultSet {
    pub fn dimension_result(&self, dimension_id: DimensionId, strategy: Strategy) -> Option<&DimensionResult> {
        self.dimension_results
            .iter()
            .find(|r| r.dimension_id == dimension_id && r.strategy == strategy)
    }

    pub fn metric(&self, key: MetricKey) -> Option<&EconomicMetric> {
        self.metrics.iter().find(|m| m.key == key)
    }
}
