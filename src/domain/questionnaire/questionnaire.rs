//! Questionnaire aggregate - one immutable, validated questionnaire version.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::domain::foundation::{
    DimensionId, DomainError, ErrorCode, OptionId, QuestionId, QuestionnaireVersionId, Strategy,
};

use super::{DimensionDefinition, EconomicInput, OptionScore, OptionScoreTable, QuestionDefinition, Scale, ScaleOption};

/// Structural problems in a questionnaire definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuestionnaireError {
    #[error("Dimension {0} is defined more than once")]
    DuplicateDimension(DimensionId),

    #[error("Question {0} is defined more than once")]
    DuplicateQuestion(QuestionId),

    #[error("Scale '{0}' is defined more than once")]
    DuplicateScale(String),

    #[error("Question {question_id} references unknown dimension {dimension_id}")]
    UnknownDimension {
        question_id: QuestionId,
        dimension_id: DimensionId,
    },

    #[error("Question {question_id} references unknown scale '{scale}'")]
    UnknownScale { question_id: QuestionId, scale: String },

    #[error("Choice question {0} has no answer scale")]
    MissingScale(QuestionId),

    #[error("Question {question_id} depends on unknown question {parent_question_id}")]
    UnknownParentQuestion {
        question_id: QuestionId,
        parent_question_id: QuestionId,
    },

    #[error("Question {question_id} requires option {option_id} which question {parent_question_id} does not offer")]
    UnknownConditionOption {
        question_id: QuestionId,
        parent_question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("Option score references unknown question {0}")]
    UnknownScoredQuestion(QuestionId),

    #[error("Option score for question {question_id} references option {option_id} outside its scale")]
    UnknownScoredOption {
        question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("Duplicate option score for question {question_id}, option {option_id}, strategy {strategy}")]
    DuplicateOptionScore {
        question_id: QuestionId,
        option_id: OptionId,
        strategy: Strategy,
    },

    #[error("Economic input {0:?} is bound to more than one question")]
    DuplicateEconomicInput(EconomicInput),
}

impl From<QuestionnaireError> for DomainError {
    fn from(err: QuestionnaireError) -> Self {
        DomainError::new(ErrorCode::InvalidQuestionnaire, err.to_string())
    }
}

/// One validated questionnaire version.
///
/// Dimensions are held in display order; questions are ordered by their
/// dimension's sort order, then their own.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    version_id: QuestionnaireVersionId,
    name: String,
    dimensions: Vec<DimensionDefinition>,
    scales: Vec<Scale>,
    questions: Vec<QuestionDefinition>,
    option_scores: OptionScoreTable,
    question_index: HashMap<QuestionId, usize>,
}

impl Questionnaire {
    /// Validates and assembles a questionnaire version.
    pub fn new(
        version_id: QuestionnaireVersionId,
        name: impl Into<String>,
        mut dimensions: Vec<DimensionDefinition>,
        scales: Vec<Scale>,
        mut questions: Vec<QuestionDefinition>,
        option_scores: Vec<OptionScore>,
    ) -> Result<Self, QuestionnaireError> {
        let mut dimension_order = HashMap::new();
        for dimension in &dimensions {
            if dimension_order.insert(dimension.id, dimension.sort_order).is_some() {
                return Err(QuestionnaireError::DuplicateDimension(dimension.id));
            }
        }

        let mut scale_keys = HashSet::new();
        for scale in &scales {
            if !scale_keys.insert(scale.key.as_str()) {
                return Err(QuestionnaireError::DuplicateScale(scale.key.clone()));
            }
        }

        let mut economic_inputs = HashSet::new();
        for question in &questions {
            if !dimension_order.contains_key(&question.dimension_id) {
                return Err(QuestionnaireError::UnknownDimension {
                    question_id: question.id,
                    dimension_id: question.dimension_id,
                });
            }
            match &question.scale {
                Some(key) if !scale_keys.contains(key.as_str()) => {
                    return Err(QuestionnaireError::UnknownScale {
                        question_id: question.id,
                        scale: key.clone(),
                    });
                }
                None if question.question_type.is_choice() => {
                    return Err(QuestionnaireError::MissingScale(question.id));
                }
                _ => {}
            }
            if let Some(input) = question.economic_input {
                if !economic_inputs.insert(input) {
                    return Err(QuestionnaireError::DuplicateEconomicInput(input));
                }
            }
        }

        dimensions.sort_by_key(|d| (d.sort_order, d.id));
        questions.sort_by_key(|q| {
            let dimension_order = dimension_order.get(&q.dimension_id).copied().unwrap_or_default();
            (dimension_order, q.sort_order, q.id)
        });

        let mut question_index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if question_index.insert(question.id, position).is_some() {
                return Err(QuestionnaireError::DuplicateQuestion(question.id));
            }
        }

        let option_scores = OptionScoreTable::from_rows(option_scores)?;

        let questionnaire = Self {
            version_id,
            name: name.into(),
            dimensions,
            scales,
            questions,
            option_scores,
            question_index,
        };
        questionnaire.validate_conditions()?;
        questionnaire.validate_option_scores()?;
        Ok(questionnaire)
    }

    fn validate_conditions(&self) -> Result<(), QuestionnaireError> {
        for question in &self.questions {
            for condition in question.effective_conditions() {
                let parent = self.question(condition.parent_question_id).ok_or(
                    QuestionnaireError::UnknownParentQuestion {
                        question_id: question.id,
                        parent_question_id: condition.parent_question_id,
                    },
                )?;
                if let Some(scale) = self.scale_of(parent) {
                    if !scale.contains(condition.required_option_id) {
                        return Err(QuestionnaireError::UnknownConditionOption {
                            question_id: question.id,
                            parent_question_id: parent.id,
                            option_id: condition.required_option_id,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_option_scores(&self) -> Result<(), QuestionnaireError> {
        for row in self.option_scores.iter() {
            let question = self
                .question(row.question_id)
                .ok_or(QuestionnaireError::UnknownScoredQuestion(row.question_id))?;
            let in_scale = self
                .scale_of(question)
                .map(|scale| scale.contains(row.option_id))
                .unwrap_or(false);
            if !in_scale {
                return Err(QuestionnaireError::UnknownScoredOption {
                    question_id: row.question_id,
                    option_id: row.option_id,
                });
            }
        }
        Ok(())
    }

    pub fn version_id(&self) -> QuestionnaireVersionId {
        self.version_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimensions in display order.
    pub fn dimensions(&self) -> &[DimensionDefinition] {
        &self.dimensions
    }

    pub fn dimension(&self, id: DimensionId) -> Option<&DimensionDefinition> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    /// All questions in evaluation order.
    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&QuestionDefinition> {
        self.question_index.get(&id).and_then(|&i| self.questions.get(i))
    }

    /// Questions of one dimension, in order.
    pub fn questions_in(&self, dimension_id: DimensionId) -> impl Iterator<Item = &QuestionDefinition> {
        self.questions.iter().filter(move |q| q.dimension_id == dimension_id)
    }

    /// The question bound to an economic input, if any.
    pub fn economic_question(&self, input: EconomicInput) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.economic_input == Some(input))
    }

    pub fn scale(&self, key: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.key == key)
    }

    /// The answer scale of a question, for choice questions.
    pub fn scale_of(&self, question: &QuestionDefinition) -> Option<&Scale> {
        question.scale.as_deref().and_then(|key| self.scale(key))
    }

    /// Selectable options of a question, empty for number questions.
    pub fn options_of(&self, question: &QuestionDefinition) -> &[ScaleOption] {
        self.scale_of(question).map(|s| s.options.as_slice()).unwrap_or(&[])
    }

    pub fn option_scores(&self) -> &OptionScoreTable {
        &self.option_scores
    }
}
