//! Dimension answers reused across assessments.
//!
//! Some dimensions (platform availability, organisation) describe the
//! organisation rather than one process. Their answers can be saved once
//! and prefilled into later assessments of the same questionnaire version.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DimensionId, QuestionnaireVersionId, Timestamp};
use crate::domain::questionnaire::Questionnaire;

use super::AnswerInput;

/// Saved answers of one shared dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedDimensionAnswers {
    pub questionnaire_version: QuestionnaireVersionId,
    pub dimension_id: DimensionId,
    pub answers: Vec<AnswerInput>,
    pub updated_at: Timestamp,
}

impl SharedDimensionAnswers {
    /// Collects the answered inputs of every shared dimension.
    ///
    /// Dimensions without a single answered question yield nothing, so an
    /// empty submission never wipes what was saved before.
    pub fn collect(questionnaire: &Questionnaire, inputs: &[AnswerInput]) -> Vec<Self> {
        questionnaire
            .dimensions()
            .iter()
            .filter(|d| d.is_shared)
            .filter_map(|dimension| {
                let answers: Vec<AnswerInput> = inputs
                    .iter()
                    .filter(|i| i.has_value() && in_dimension(questionnaire, i, dimension.id))
                    .cloned()
                    .collect();
                (!answers.is_empty()).then(|| Self {
                    questionnaire_version: questionnaire.version_id(),
                    dimension_id: dimension.id,
                    answers,
                    updated_at: Timestamp::now(),
                })
            })
            .collect()
    }
}

/// Adds saved answers for shared dimensions the inputs leave unanswered.
///
/// Returns the completed inputs and the dimensions that were prefilled.
/// Saved sets of another version, or of a dimension no longer marked
/// shared, are ignored.
pub fn prefill_inputs(
    questionnaire: &Questionnaire,
    mut inputs: Vec<AnswerInput>,
    saved: &[SharedDimensionAnswers],
) -> (Vec<AnswerInput>, Vec<DimensionId>) {
    let mut prefilled = Vec::new();

    for shared in saved {
        let still_shared = questionnaire
            .dimension(shared.dimension_id)
            .map(|d| d.is_shared)
            .unwrap_or(false);
        if shared.questionnaire_version != questionnaire.version_id() || !still_shared {
            continue;
        }

        let answered = inputs
            .iter()
            .any(|i| i.has_value() && in_dimension(questionnaire, i, shared.dimension_id));
        if answered {
            continue;
        }

        // Empty inputs of the dimension would collide with the saved ones.
        inputs.retain(|i| !in_dimension(questionnaire, i, shared.dimension_id));
        inputs.extend(shared.answers.iter().cloned());
        prefilled.push(shared.dimension_id);
    }

    (inputs, prefilled)
}

fn in_dimension(questionnaire: &Questionnaire, input: &AnswerInput, dimension_id: DimensionId) -> bool {
    questionnaire
        .question(input.question_id)
        .map(|q| q.dimension_id == dimension_id)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OptionId, QuestionId};
    use crate::domain::questionnaire::{
        CalculationMethod, DimensionDefinition, QuestionDefinition, QuestionType, Scale, ScaleOption,
    };

    const PLATFORM: DimensionId = DimensionId::new(1);
    const PROCESS: DimensionId = DimensionId::new(2);
    const TOOL: QuestionId = QuestionId::new(10);
    const BUDGET: QuestionId = QuestionId::new(11);
    const RULES: QuestionId = QuestionId::new(20);
    const YES: OptionId = OptionId::new(1);
    const NO: OptionId = OptionId::new(2);

    fn questionnaire() -> Questionnaire {
        let option = |id: OptionId, code: &str| ScaleOption {
            id,
            code: code.into(),
            label: code.into(),
            sort_order: id.value() as i32,
            is_not_applicable: false,
        };
        let choice = |id: QuestionId, dimension: DimensionId| {
            QuestionDefinition::new(id, dimension, id.to_string(), QuestionType::SingleChoice)
                .with_scale("yes_no")
        };
        Questionnaire::new(
            QuestionnaireVersionId::new(1),
            "Shared",
            vec![
                DimensionDefinition::new(PLATFORM, "1", "Platform", 1, CalculationMethod::Filter)
                    .with_sharing(true),
                DimensionDefinition::new(PROCESS, "2", "Process", 2, CalculationMethod::Mean),
            ],
            vec![Scale::new("yes_no", "Yes/No", vec![option(YES, "yes"), option(NO, "no")])],
            vec![
                choice(TOOL, PLATFORM),
                QuestionDefinition::new(BUDGET, PLATFORM, "11", QuestionType::Number),
                choice(RULES, PROCESS),
            ],
            vec![],
        )
        .unwrap()
    }

    fn saved(answers: Vec<AnswerInput>) -> SharedDimensionAnswers {
        SharedDimensionAnswers {
            questionnaire_version: QuestionnaireVersionId::new(1),
            dimension_id: PLATFORM,
            answers,
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn collect_keeps_only_answered_shared_dimensions() {
        let inputs = vec![
            AnswerInput::options(TOOL, [YES]),
            AnswerInput::number(BUDGET, 5_000.0),
            AnswerInput::options(RULES, [NO]),
        ];

        let shared = SharedDimensionAnswers::collect(&questionnaire(), &inputs);

        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].dimension_id, PLATFORM);
        assert_eq!(shared[0].answers, inputs[..2].to_vec());
    }

    #[test]
    fn collect_skips_unanswered_shared_dimension() {
        let inputs = vec![
            AnswerInput::options(TOOL, Vec::new()),
            AnswerInput::options(RULES, [NO]),
        ];

        assert!(SharedDimensionAnswers::collect(&questionnaire(), &inputs).is_empty());
    }

    #[test]
    fn prefill_fills_unanswered_shared_dimension() {
        let inputs = vec![AnswerInput::options(TOOL, Vec::new()), AnswerInput::options(RULES, [YES])];
        let saved = [saved(vec![AnswerInput::options(TOOL, [NO])])];

        let (inputs, prefilled) = prefill_inputs(&questionnaire(), inputs, &saved);

        assert_eq!(prefilled, vec![PLATFORM]);
        assert_eq!(
            inputs,
            vec![AnswerInput::options(RULES, [YES]), AnswerInput::options(TOOL, [NO])]
        );
    }

    #[test]
    fn submitted_answers_win_over_saved_ones() {
        let inputs = vec![AnswerInput::number(BUDGET, 100.0)];
        let saved = [saved(vec![AnswerInput::options(TOOL, [NO])])];

        let (completed, prefilled) = prefill_inputs(&questionnaire(), inputs.clone(), &saved);

        assert!(prefilled.is_empty());
        assert_eq!(completed, inputs);
    }

    #[test]
    fn saved_answers_of_other_versions_are_ignored() {
        let mut other = saved(vec![AnswerInput::options(TOOL, [NO])]);
        other.questionnaire_version = QuestionnaireVersionId::new(2);

        let (completed, prefilled) = prefill_inputs(&questionnaire(), Vec::new(), &[other]);

        assert!(prefilled.is_empty());
        assert!(completed.is_empty());
    }
}
