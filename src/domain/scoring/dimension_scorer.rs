//! Dimension Scorer - mean score of one dimension for one strategy.
//!
//! # Algorithm
//!
//! Questions are visited in order. Each applicable choice answer is looked
//! up in the option score table for the strategy:
//!
//! - single choice: an exclusion row vetoes the dimension at once, a scored
//!   row adds its score
//! - multiple choice: any exclusion among the selected options vetoes the
//!   dimension, otherwise the best applicable score is added
//! - number questions contribute nothing here
//!
//! # Edge Cases
//!
//! - Options without a score row are skipped
//! - A dimension with nothing scorable yields `None`, not zero
//! - The first exclusion stops accumulation for this dimension only

use crate::domain::assessment::DimensionResult;
use crate::domain::foundation::{OptionId, QuestionId, Strategy};
use crate::domain::questionnaire::{
    Contribution, DimensionDefinition, OptionScoreTable, QuestionDefinition, QuestionType, Questionnaire,
};

use super::ApplicableAnswers;

/// Contribution of one question to a dimension accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
enum QuestionOutcome {
    Excluded,
    Score(f64),
    Skipped,
}

/// Stateless scorer for mean-based dimensions.
pub struct DimensionScorer;

impl DimensionScorer {
    /// Scores one dimension for one strategy.
    pub fn score(
        questionnaire: &Questionnaire,
        dimension: &DimensionDefinition,
        strategy: Strategy,
        answers: &ApplicableAnswers,
    ) -> DimensionResult {
        let table = questionnaire.option_scores();
        let mut scores = Vec::new();

        for question in questionnaire.questions_in(dimension.id) {
            match Self::score_question(table, question, strategy, answers) {
                QuestionOutcome::Excluded => {
                    return DimensionResult::excluded(dimension.id, strategy, question.id);
                }
                QuestionOutcome::Score(score) => scores.push(score),
                QuestionOutcome::Skipped => {}
            }
        }

        DimensionResult::scored(dimension.id, strategy, Self::mean(&scores))
    }

    fn score_question(
        table: &OptionScoreTable,
        question: &QuestionDefinition,
        strategy: Strategy,
        answers: &ApplicableAnswers,
    ) -> QuestionOutcome {
        let selected = answers.options(question.id);
        match question.question_type {
            QuestionType::Number => QuestionOutcome::Skipped,
            QuestionType::SingleChoice => {
                let Some(&option_id) = selected.first() else {
                    return QuestionOutcome::Skipped;
                };
                match table.lookup(question.id, option_id, strategy).map(|r| r.contribution()) {
                    Some(Contribution::Exclusion) => QuestionOutcome::Excluded,
                    Some(Contribution::Score(score)) => QuestionOutcome::Score(score),
                    Some(Contribution::Nothing) | None => QuestionOutcome::Skipped,
                }
            }
            QuestionType::MultipleChoice => Self::best_of(table, question.id, selected, strategy),
        }
    }

    /// Best applicable score among the selected options, unless one of
    /// them is an exclusion.
    fn best_of(
        table: &OptionScoreTable,
        question_id: QuestionId,
        selected: &[OptionId],
        strategy: Strategy,
    ) -> QuestionOutcome {
        let mut best: Option<f64> = None;
        for row in table.lookup_all(question_id, selected, strategy) {
            match row.contribution() {
                Contribution::Exclusion => return QuestionOutcome::Excluded,
                Contribution::Score(score) => {
                    best = Some(best.map_or(score, |b| b.max(score)));
                }
                Contribution::Nothing => {}
            }
        }
        best.map_or(QuestionOutcome::Skipped, QuestionOutcome::Score)
    }

    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
