//! Assessment evaluator - the full recomputation pipeline.
//!
//! Resolves applicability, scores every dimension for both strategies,
//! and aggregates the total. Pure and synchronous; persistence is left to
//! the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::applicability::{
    ApplicabilityError, ApplicabilityResolver, ConditionGraph, ResolutionReport, DEFAULT_MAX_PASSES,
};
use crate::domain::assessment::{Answer, ResultSet};
use crate::domain::foundation::Strategy;
use crate::domain::questionnaire::{CalculationMethod, Questionnaire};

use super::{
    ApplicableAnswers, DimensionScorer, EconomicParameters, EconomicScorer, TotalAggregator,
    DEFAULT_RECOMMENDATION_THRESHOLD,
};

/// Tunable constants of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub economic: EconomicParameters,
    pub recommendation_threshold: f64,
    pub max_resolution_passes: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            economic: EconomicParameters::default(),
            recommendation_threshold: DEFAULT_RECOMMENDATION_THRESHOLD,
            max_resolution_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub resolution: ResolutionReport,
    pub results: ResultSet,
}

#[derive(Debug, Clone, Default)]
pub struct AssessmentEvaluator {
    policy: ScoringPolicy,
}

impl AssessmentEvaluator {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Resolves `answers` in place and derives the full result set.
    ///
    /// On error `answers` may be partially resolved; callers must not
    /// persist them.
    pub fn evaluate(
        &self,
        questionnaire: &Questionnaire,
        answers: &mut [Answer],
    ) -> Result<Evaluation, ApplicabilityError> {
        // 1. Settle applicability
        let graph = ConditionGraph::build(questionnaire);
        let resolution =
            ApplicabilityResolver::new(self.policy.max_resolution_passes).resolve(&graph, answers)?;

        // 2. Score each dimension in display order
        let view = ApplicableAnswers::from_answers(answers);
        let mut dimension_results = Vec::with_capacity(questionnaire.dimensions().len() * 2);
        let mut metrics = Vec::new();
        for dimension in questionnaire.dimensions() {
            match dimension.calculation_method {
                CalculationMethod::Economic => {
                    let outcome =
                        EconomicScorer::score(questionnaire, dimension, &view, &self.policy.economic);
                    dimension_results.extend(outcome.results);
                    if metrics.is_empty() {
                        metrics = outcome.metrics;
                    }
                }
                CalculationMethod::Mean | CalculationMethod::Filter => {
                    for strategy in Strategy::ALL {
                        dimension_results.push(DimensionScorer::score(
                            questionnaire,
                            dimension,
                            strategy,
                            &view,
                        ));
                    }
                }
            }
        }

        // 3. Aggregate
        let total = TotalAggregator::aggregate(
            questionnaire.dimensions(),
            &dimension_results,
            self.policy.recommendation_threshold,
        );

        debug!(
            passes = resolution.passes,
            changed = resolution.changed.len(),
            recommendation = %total.recommendation,
            "Assessment evaluated"
        );

        Ok(Evaluation {
            resolution,
            results: ResultSet {
                dimension_results,
                total,
                metrics,
            },
        })
    }
}
