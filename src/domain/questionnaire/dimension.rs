//! Dimension definitions - themed question groups and how they are scored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DimensionId;

/// How a dimension turns its answers into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Mean of per-question option scores, with exclusions.
    Mean,
    /// Gatekeeping questions (platform availability). Scored like `Mean`,
    /// but primarily used for exclusions and conditions.
    Filter,
    /// Return-on-investment derived from numeric inputs.
    Economic,
}

impl CalculationMethod {
    /// Whether dimensions using this method contribute to the total by default.
    pub fn participates_by_default(&self) -> bool {
        matches!(self, CalculationMethod::Mean)
    }
}

/// A themed group of questions contributing one score per strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDefinition {
    pub id: DimensionId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub calculation_method: CalculationMethod,
    /// Whether this dimension's mean feeds the averaged total score.
    pub participates_in_total: bool,
    /// Whether answers to this dimension can be saved once and reused by
    /// other assessments.
    #[serde(default)]
    pub is_shared: bool,
}

impl DimensionDefinition {
    /// Creates a dimension whose total participation follows its method.
    pub fn new(
        id: DimensionId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
        calculation_method: CalculationMethod,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            sort_order,
            calculation_method,
            participates_in_total: calculation_method.participates_by_default(),
            is_shared: false,
        }
    }

    /// Overrides total participation.
    pub fn with_total_participation(mut self, participates: bool) -> Self {
        self.participates_in_total = participates;
        self
    }

    /// Marks the dimension's answers as reusable across assessments.
    pub fn with_sharing(mut self, is_shared: bool) -> Self {
        self.is_shared = is_shared;
        self
    }

    /// Returns true when this dimension is scored by the economic scorer.
    pub fn is_economic(&self) -> bool {
        self.calculation_method == CalculationMethod::Economic
    }
}
