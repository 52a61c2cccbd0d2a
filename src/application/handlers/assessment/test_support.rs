//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::fixture::Fixture;
use crate::adapters::memory::{InMemoryAssessmentStore, InMemoryQuestionnaireReader};
use crate::domain::assessment::AnswerInput;
use crate::domain::foundation::{DimensionId, OptionId, QuestionId, QuestionnaireVersionId};
use crate::domain::questionnaire::Questionnaire;

pub const VERSION: QuestionnaireVersionId = QuestionnaireVersionId::new(1);
pub const PLATFORM_DIMENSION: DimensionId = DimensionId::new(1);
pub const PLATFORM: QuestionId = QuestionId::new(10);
pub const DOCUMENTED: QuestionId = QuestionId::new(20);
pub const COMPLETENESS: QuestionId = QuestionId::new(21);
pub const YES: OptionId = OptionId::new(1);
pub const NO: OptionId = OptionId::new(2);
pub const FULLY: OptionId = OptionId::new(15);

/// Shared platform filter plus one process dimension whose follow-up
/// depends on the first answer. Answering "no" excludes RPA.
const QUESTIONNAIRE: &str = r#"
version_id: 1
name: Handler test
dimensions:
  - { id: 1, code: "1", name: Platform, sort_order: 1, calculation_method: filter, shared: true }
  - { id: 2, code: "3", name: Process, sort_order: 2, calculation_method: mean }
scales:
  - key: yes_no
    label: Yes/No
    options:
      - { id: 1, code: "YES", label: "Yes", sort_order: 1 }
      - { id: 2, code: "NO", label: "No", sort_order: 2 }
  - key: likert
    label: Likert
    options:
      - { id: 11, code: "1", label: "not at all", sort_order: 1 }
      - { id: 12, code: "2", label: "barely", sort_order: 2 }
      - { id: 13, code: "3", label: "partly", sort_order: 3 }
      - { id: 14, code: "4", label: "mostly", sort_order: 4 }
      - { id: 15, code: "5", label: "fully", sort_order: 5 }
questions:
  - { id: 10, dimension_id: 1, code: "1.1", text: "Is an automation platform available?", question_type: single_choice, scale: yes_no }
  - { id: 20, dimension_id: 2, code: "3.1", text: "Is the process documented?", question_type: single_choice, scale: yes_no }
  - id: 21
    dimension_id: 2
    code: "3.2"
    text: "How complete is the documentation?"
    question_type: single_choice
    scale: likert
    conditions:
      - { parent_question_id: 20, required_option_id: 1 }
option_scores:
  - question_id: 10
    rpa: { 1: not_applicable, 2: not_applicable }
    ipa: { 1: not_applicable, 2: not_applicable }
  - question_id: 20
    rpa: { 1: 4, 2: exclude }
    ipa: { 1: 4, 2: 2 }
  - question_id: 21
    rpa: { 11: 1, 12: 2, 13: 3, 14: 4, 15: 5 }
    ipa: { 11: 1, 12: 2, 13: 3, 14: 4, 15: 5 }
"#;

pub fn questionnaire() -> Questionnaire {
    Fixture::from_yaml(QUESTIONNAIRE).unwrap().questionnaire
}

pub async fn reader() -> Arc<InMemoryQuestionnaireReader> {
    let reader = InMemoryQuestionnaireReader::new();
    reader.insert(questionnaire()).await;
    Arc::new(reader)
}

pub fn store() -> Arc<InMemoryAssessmentStore> {
    Arc::new(InMemoryAssessmentStore::new())
}

/// Documented process with complete documentation.
pub fn documented_inputs() -> Vec<AnswerInput> {
    vec![
        AnswerInput::options(PLATFORM, [YES]),
        AnswerInput::options(DOCUMENTED, [YES]),
        AnswerInput::options(COMPLETENESS, [FULLY]),
    ]
}

/// Undocumented process; the stale follow-up answer must be cleared.
pub fn undocumented_inputs() -> Vec<AnswerInput> {
    vec![
        AnswerInput::options(PLATFORM, [YES]),
        AnswerInput::options(DOCUMENTED, [NO]),
        AnswerInput::options(COMPLETENESS, [FULLY]),
    ]
}
