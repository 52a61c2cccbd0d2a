//! Completion status of one dimension.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DimensionId;
use crate::domain::questionnaire::Questionnaire;

use super::Answer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionStatus {
    NotStarted,
    Partial,
    Complete,
}

impl DimensionStatus {
    /// Counts questions of the dimension that have an applicable answer
    /// carrying a value, against the dimension's question count.
    pub fn of(questionnaire: &Questionnaire, dimension_id: DimensionId, answers: &[Answer]) -> Self {
        let mut total = 0usize;
        let mut answered = 0usize;
        for question in questionnaire.questions_in(dimension_id) {
            total += 1;
            let has_answer = answers.iter().any(|a| {
                a.question_id == question.id
                    && a.is_applicable
                    && if question.question_type.is_choice() {
                        a.selected_option.is_some()
                    } else {
                        a.numeric_value.is_some()
                    }
            });
            if has_answer {
                answered += 1;
            }
        }

        match answered {
            0 => DimensionStatus::NotStarted,
            n if n >= total => DimensionStatus::Complete,
            _ => DimensionStatus::Partial,
        }
    }
}
