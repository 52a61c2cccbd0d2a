//! Read-only view of the applicable answers of one assessment.

use std::collections::HashMap;

use crate::domain::assessment::Answer;
use crate::domain::foundation::{OptionId, QuestionId};

/// Applicable selections and numeric values, grouped by question.
///
/// Inapplicable rows are dropped on construction; scorers never see them.
#[derive(Debug, Clone, Default)]
pub struct ApplicableAnswers {
    options: HashMap<QuestionId, Vec<OptionId>>,
    numbers: HashMap<QuestionId, f64>,
}

impl ApplicableAnswers {
    pub fn from_answers(answers: &[Answer]) -> Self {
        let mut view = Self::default();
        for answer in answers.iter().filter(|a| a.is_applicable) {
            if let Some(option) = answer.selected_option {
                let selected = view.options.entry(answer.question_id).or_default();
                if !selected.contains(&option) {
                    selected.push(option);
                }
            }
            if let Some(value) = answer.numeric_value {
                // Last row wins, matching storage order.
                view.numbers.insert(answer.question_id, value);
            }
        }
        view
    }

    /// Selected options in storage order; empty if unanswered.
    pub fn options(&self, question_id: QuestionId) -> &[OptionId] {
        self.options.get(&question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn number(&self, question_id: QuestionId) -> Option<f64> {
        self.numbers.get(&question_id).copied()
    }
}
