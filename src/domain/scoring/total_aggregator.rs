//! Total Aggregator - one verdict per assessment.
//!
//! Only dimensions flagged `participates_in_total` feed the totals. A
//! strategy is excluded at assessment level when a participating dimension
//! was excluded by an identified question.

use crate::domain::assessment::{DimensionResult, Recommendation, StrategyTotal, TotalResult};
use crate::domain::foundation::Strategy;
use crate::domain::questionnaire::DimensionDefinition;

use super::DimensionScorer;

/// Default minimum score difference for preferring one strategy.
pub const DEFAULT_RECOMMENDATION_THRESHOLD: f64 = 0.25;

/// Stateless aggregator of dimension results.
pub struct TotalAggregator;

impl TotalAggregator {
    /// Combines dimension results into the assessment total.
    pub fn aggregate(
        dimensions: &[DimensionDefinition],
        results: &[DimensionResult],
        threshold: f64,
    ) -> TotalResult {
        let rpa = Self::strategy_total(dimensions, results, Strategy::Rpa);
        let ipa = Self::strategy_total(dimensions, results, Strategy::Ipa);
        let recommendation = Self::recommend(&rpa, &ipa, threshold);
        TotalResult {
            rpa,
            ipa,
            recommendation,
        }
    }

    fn strategy_total(
        dimensions: &[DimensionDefinition],
        results: &[DimensionResult],
        strategy: Strategy,
    ) -> StrategyTotal {
        let participating = results.iter().filter(|r| {
            r.strategy == strategy
                && dimensions
                    .iter()
                    .any(|d| d.id == r.dimension_id && d.participates_in_total)
        });

        let mut scores = Vec::new();
        let mut is_excluded = false;
        for result in participating {
            if result.is_attributed_exclusion() {
                is_excluded = true;
            } else if let (false, Some(score)) = (result.is_excluded, result.score) {
                scores.push(score);
            }
        }

        StrategyTotal {
            strategy,
            score: if is_excluded { None } else { DimensionScorer::mean(&scores) },
            is_excluded,
        }
    }

    /// Decision table over exclusions and the score difference.
    pub fn recommend(rpa: &StrategyTotal, ipa: &StrategyTotal, threshold: f64) -> Recommendation {
        match (rpa.is_excluded, ipa.is_excluded) {
            (true, true) => Recommendation::Neither,
            (true, false) => Recommendation::Ipa,
            (false, true) => Recommendation::Rpa,
            (false, false) => match (rpa.score, ipa.score) {
                (Some(rpa), Some(ipa)) => {
                    let diff = ipa - rpa;
                    if diff > threshold {
                        Recommendation::Ipa
                    } else if diff < -threshold {
                        Recommendation::Rpa
                    } else {
                        Recommendation::Neutral
                    }
                }
                _ => Recommendation::Incomplete,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DimensionId, QuestionId};
    use crate::domain::questionnaire::CalculationMethod;

    const T: f64 = DEFAULT_RECOMMENDATION_THRESHOLD;

    fn dims() -> Vec<DimensionDefinition> {
        vec![
            DimensionDefinition::new(DimensionId::new(1), "1", "Platform", 1, CalculationMethod::Filter),
            DimensionDefinition::new(DimensionId::new(2), "2", "Process", 2, CalculationMethod::Mean),
            DimensionDefinition::new(DimensionId::new(3), "3", "Data", 3, CalculationMethod::Mean),
            DimensionDefinition::new(DimensionId::new(7), "7", "Economics", 7, CalculationMethod::Economic),
        ]
    }

    fn scored(dim: i64, strategy: Strategy, score: Option<f64>) -> DimensionResult {
        DimensionResult::scored(DimensionId::new(dim), strategy, score)
    }

    fn total(strategy: Strategy, score: Option<f64>, is_excluded: bool) -> StrategyTotal {
        StrategyTotal {
            strategy,
            score,
            is_excluded,
        }
    }

    #[test]
    fn averages_only_participating_dimensions() {
        let results = vec![
            scored(1, Strategy::Rpa, Some(1.0)),
            scored(2, Strategy::Rpa, Some(2.0)),
            scored(3, Strategy::Rpa, Some(4.0)),
            scored(7, Strategy::Rpa, Some(5.0)),
            scored(2, Strategy::Ipa, None),
            scored(3, Strategy::Ipa, Some(3.5)),
        ];

        let result = TotalAggregator::aggregate(&dims(), &results, T);

        assert_eq!(result.rpa.score, Some(3.0));
        assert_eq!(result.ipa.score, Some(3.5));
        assert_eq!(result.recommendation, Recommendation::Ipa);
    }

    #[test]
    fn attributed_exclusion_excludes_strategy() {
        let results = vec![
            DimensionResult::excluded(DimensionId::new(2), Strategy::Rpa, QuestionId::new(9)),
            scored(3, Strategy::Rpa, Some(5.0)),
            scored(2, Strategy::Ipa, Some(4.0)),
        ];

        let result = TotalAggregator::aggregate(&dims(), &results, T);

        assert!(result.rpa.is_excluded);
        assert_eq!(result.rpa.score, None);
        assert_eq!(result.recommendation, Recommendation::Ipa);
    }

    #[test]
    fn unattributed_exclusion_is_not_counted() {
        let mut unattributed = scored(2, Strategy::Rpa, None);
        unattributed.is_excluded = true;
        let results = vec![unattributed, scored(3, Strategy::Rpa, Some(3.0))];

        let result = TotalAggregator::aggregate(&dims(), &results, T);

        assert!(!result.rpa.is_excluded);
        assert_eq!(result.rpa.score, Some(3.0));
    }

    #[test]
    fn exclusion_in_non_participating_dimension_is_ignored() {
        let results = vec![
            DimensionResult::excluded(DimensionId::new(1), Strategy::Rpa, QuestionId::new(1)),
            scored(2, Strategy::Rpa, Some(3.0)),
        ];

        let result = TotalAggregator::aggregate(&dims(), &results, T);

        assert!(!result.rpa.is_excluded);
    }

    #[test]
    fn recommendation_table() {
        use Recommendation::*;
        let rpa = Strategy::Rpa;
        let ipa = Strategy::Ipa;
        let cases = [
            (total(rpa, Some(3.0), false), total(ipa, Some(3.0), false), Neutral),
            (total(rpa, Some(2.0), false), total(ipa, Some(3.0), false), Ipa),
            (total(rpa, Some(3.0), false), total(ipa, Some(2.0), false), Rpa),
            (total(rpa, Some(3.0), false), total(ipa, Some(3.25), false), Neutral),
            (total(rpa, None, true), total(ipa, Some(4.0), false), Ipa),
            (total(rpa, Some(4.0), false), total(ipa, None, true), Rpa),
            (total(rpa, None, true), total(ipa, None, true), Neither),
            (total(rpa, Some(3.0), false), total(ipa, None, false), Incomplete),
            (total(rpa, None, false), total(ipa, None, false), Incomplete),
        ];

        for (a, b, expected) in cases {
            assert_eq!(TotalAggregator::recommend(&a, &b, T), expected, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn no_results_is_incomplete() {
        let result = TotalAggregator::aggregate(&dims(), &[], T);
        assert_eq!(result.recommendation, Recommendation::Incomplete);
        assert_eq!(result.rpa.score, None);
    }
}
