//! Answers of one assessment and the validation of submitted input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{
    AssessmentId, DomainError, ErrorCode, OptionId, QuestionId, QuestionnaireVersionId, Timestamp,
};
use crate::domain::questionnaire::{QuestionType, Questionnaire};

/// One stored answer row.
///
/// Choice questions store one row per selected option; number questions
/// store a single row with a numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub selected_option: Option<OptionId>,
    pub numeric_value: Option<f64>,
    pub is_applicable: bool,
}

impl Answer {
    /// Creates an applicable answer selecting one option.
    pub fn option(question_id: QuestionId, option_id: OptionId) -> Self {
        Self {
            question_id,
            selected_option: Some(option_id),
            numeric_value: None,
            is_applicable: true,
        }
    }

    /// Creates an applicable numeric answer.
    pub fn number(question_id: QuestionId, value: f64) -> Self {
        Self {
            question_id,
            selected_option: None,
            numeric_value: Some(value),
            is_applicable: true,
        }
    }

    /// Returns true if the row still carries a value.
    pub fn has_value(&self) -> bool {
        self.selected_option.is_some() || self.numeric_value.is_some()
    }

    /// Marks the row out of scope and drops its values.
    pub fn invalidate(&mut self) {
        self.is_applicable = false;
        self.selected_option = None;
        self.numeric_value = None;
    }
}

/// All answers of one assessment for one questionnaire version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub assessment_id: AssessmentId,
    pub questionnaire_version: QuestionnaireVersionId,
    pub answers: Vec<Answer>,
    /// When the answers were last submitted. Recomputation keeps it.
    pub updated_at: Timestamp,
}

impl AnswerSheet {
    pub fn new(
        assessment_id: AssessmentId,
        questionnaire_version: QuestionnaireVersionId,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            assessment_id,
            questionnaire_version,
            answers,
            updated_at: Timestamp::now(),
        }
    }

    /// Rows stored for one question, applicable or not.
    pub fn answers_for(&self, question_id: QuestionId) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(move |a| a.question_id == question_id)
    }
}

/// Raw answer to one question as submitted by a respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: QuestionId,
    #[serde(default)]
    pub option_ids: Vec<OptionId>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

impl AnswerInput {
    pub fn options(question_id: QuestionId, option_ids: impl IntoIterator<Item = OptionId>) -> Self {
        Self {
            question_id,
            option_ids: option_ids.into_iter().collect(),
            numeric_value: None,
        }
    }

    pub fn number(question_id: QuestionId, value: f64) -> Self {
        Self {
            question_id,
            option_ids: Vec::new(),
            numeric_value: Some(value),
        }
    }

    /// Returns true if the input selects an option or carries a number.
    pub fn has_value(&self) -> bool {
        !self.option_ids.is_empty() || self.numeric_value.is_some()
    }
}

/// Submitted input that violates a question's answer shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerValidationError {
    #[error("Question {0} does not exist in this questionnaire")]
    UnknownQuestion(QuestionId),

    #[error("Question {0} was answered more than once")]
    DuplicateQuestion(QuestionId),

    #[error("Number question {0} cannot select options")]
    OptionsOnNumberQuestion(QuestionId),

    #[error("Choice question {0} cannot take a numeric value")]
    NumberOnChoiceQuestion(QuestionId),

    #[error("Numeric answer to question {0} must be finite")]
    NonFiniteNumber(QuestionId),

    #[error("Single choice question {0} accepts at most one option")]
    TooManyOptions(QuestionId),

    #[error("Option {option_id} is not part of the scale of question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
}

impl From<AnswerValidationError> for DomainError {
    fn from(err: AnswerValidationError) -> Self {
        DomainError::new(ErrorCode::InvalidAnswer, err.to_string())
    }
}

/// Converts submitted inputs into stored answer rows.
///
/// Every produced row is applicable; the resolver decides scope afterwards.
/// An input with neither options nor a value yields no rows.
pub fn validate_inputs(
    questionnaire: &Questionnaire,
    inputs: &[AnswerInput],
) -> Result<Vec<Answer>, AnswerValidationError> {
    let mut seen = HashSet::new();
    let mut answers = Vec::new();

    for input in inputs {
        let question = questionnaire
            .question(input.question_id)
            .ok_or(AnswerValidationError::UnknownQuestion(input.question_id))?;
        if !seen.insert(question.id) {
            return Err(AnswerValidationError::DuplicateQuestion(question.id));
        }

        match question.question_type {
            QuestionType::Number => {
                if !input.option_ids.is_empty() {
                    return Err(AnswerValidationError::OptionsOnNumberQuestion(question.id));
                }
                if let Some(value) = input.numeric_value {
                    if !value.is_finite() {
                        return Err(AnswerValidationError::NonFiniteNumber(question.id));
                    }
                    answers.push(Answer::number(question.id, value));
                }
            }
            QuestionType::SingleChoice | QuestionType::MultipleChoice => {
                if input.numeric_value.is_some() {
                    return Err(AnswerValidationError::NumberOnChoiceQuestion(question.id));
                }

                let mut distinct = Vec::new();
                for option_id in &input.option_ids {
                    if !distinct.contains(option_id) {
                        distinct.push(*option_id);
                    }
                }
                if question.question_type == QuestionType::SingleChoice && distinct.len() > 1 {
                    return Err(AnswerValidationError::TooManyOptions(question.id));
                }

                let scale = questionnaire.scale_of(question);
                for option_id in distinct {
                    if !scale.map(|s| s.contains(option_id)).unwrap_or(false) {
                        return Err(AnswerValidationError::UnknownOption {
                            question_id: question.id,
                            option_id,
                        });
                    }
                    answers.push(Answer::option(question.id, option_id));
                }
            }
        }
    }

    Ok(answers)
}
