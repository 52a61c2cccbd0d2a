//! YAML fixture loader.
//!
//! A fixture is one questionnaire version plus an optional set of
//! submitted answers. Option scores are written per question as
//! option-to-cell maps, where a cell is a number, `exclude`, or
//! `not_applicable`:
//!
//! ```yaml
//! option_scores:
//!   - question_id: 10
//!     rpa: { 1: 1, 2: 3, 3: exclude }
//!     ipa: { 1: 2, 2: 4, 3: 5 }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use crate::domain::assessment::AnswerInput;
use crate::domain::foundation::{
    DimensionId, DomainError, ErrorCode, OptionId, QuestionId, QuestionnaireVersionId, Strategy,
};
use crate::domain::questionnaire::{
    CalculationMethod, DimensionDefinition, OptionScore, QuestionDefinition, Questionnaire,
    QuestionnaireError, Scale, ScaleOption,
};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture: {0}")]
    Io(String),

    #[error("Failed to parse fixture: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] QuestionnaireError),
}

impl From<FixtureError> for DomainError {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::Invalid(inner) => inner.into(),
            other => DomainError::new(ErrorCode::InternalError, other.to_string()),
        }
    }
}

/// Parsed fixture: a validated questionnaire and the answers to submit.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub questionnaire: Questionnaire,
    pub answers: Vec<AnswerInput>,
}

impl Fixture {
    pub fn from_yaml(source: &str) -> Result<Self, FixtureError> {
        let document: FixtureDocument =
            serde_yaml::from_str(source).map_err(|e| FixtureError::Parse(e.to_string()))?;
        document.into_fixture()
    }
}

/// Reads and validates a fixture file.
pub async fn load_fixture<P: AsRef<Path>>(path: P) -> Result<Fixture, FixtureError> {
    let source = fs::read_to_string(path.as_ref())
        .await
        .map_err(|e| FixtureError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
    Fixture::from_yaml(&source)
}

#[derive(Debug, Deserialize)]
struct FixtureDocument {
    version_id: QuestionnaireVersionId,
    name: String,
    dimensions: Vec<DimensionDto>,
    #[serde(default)]
    scales: Vec<ScaleDto>,
    #[serde(default)]
    questions: Vec<QuestionDefinition>,
    #[serde(default)]
    option_scores: Vec<QuestionScoresDto>,
    #[serde(default)]
    answers: Vec<AnswerInput>,
}

#[derive(Debug, Deserialize)]
struct DimensionDto {
    id: DimensionId,
    code: String,
    name: String,
    sort_order: i32,
    calculation_method: CalculationMethod,
    #[serde(default)]
    participates_in_total: Option<bool>,
    #[serde(default)]
    shared: bool,
}

#[derive(Debug, Deserialize)]
struct ScaleDto {
    key: String,
    label: String,
    options: Vec<ScaleOption>,
}

#[derive(Debug, Deserialize)]
struct QuestionScoresDto {
    question_id: QuestionId,
    #[serde(default)]
    rpa: BTreeMap<OptionId, ScoreCell>,
    #[serde(default)]
    ipa: BTreeMap<OptionId, ScoreCell>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ScoreCell {
    Score(f64),
    Flag(ScoreFlag),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScoreFlag {
    Exclude,
    NotApplicable,
}

impl ScoreCell {
    fn into_row(self, question_id: QuestionId, option_id: OptionId, strategy: Strategy) -> OptionScore {
        match self {
            ScoreCell::Score(score) => OptionScore::scored(question_id, option_id, strategy, score),
            ScoreCell::Flag(ScoreFlag::Exclude) => OptionScore::exclusion(question_id, option_id, strategy),
            ScoreCell::Flag(ScoreFlag::NotApplicable) => {
                OptionScore::not_applicable(question_id, option_id, strategy)
            }
        }
    }
}

impl FixtureDocument {
    fn into_fixture(self) -> Result<Fixture, FixtureError> {
        let dimensions = self
            .dimensions
            .into_iter()
            .map(|dto| {
                let definition = DimensionDefinition::new(
                    dto.id,
                    dto.code,
                    dto.name,
                    dto.sort_order,
                    dto.calculation_method,
                )
                .with_sharing(dto.shared);
                match dto.participates_in_total {
                    Some(participates) => definition.with_total_participation(participates),
                    None => definition,
                }
            })
            .collect();

        let scales = self
            .scales
            .into_iter()
            .map(|dto| Scale::new(dto.key, dto.label, dto.options))
            .collect();

        let mut option_scores = Vec::new();
        for entry in self.option_scores {
            for (strategy, cells) in [(Strategy::Rpa, &entry.rpa), (Strategy::Ipa, &entry.ipa)] {
                for (option_id, cell) in cells {
                    option_scores.push(cell.into_row(entry.question_id, *option_id, strategy));
                }
            }
        }

        let questionnaire = Questionnaire::new(
            self.version_id,
            self.name,
            dimensions,
            scales,
            self.questions,
            option_scores,
        )?;

        Ok(Fixture {
            questionnaire,
            answers: self.answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::Contribution;
    use std::io::Write;

    const SMALL: &str = r#"
version_id: 4
name: Small
dimensions:
  - { id: 1, code: "1", name: Platform, sort_order: 1, calculation_method: filter, shared: true }
  - { id: 2, code: "2", name: Process, sort_order: 2, calculation_method: mean, participates_in_total: false }
scales:
  - key: yes_no
    label: Yes/No
    options:
      - { id: 2, code: "NO", label: "No", sort_order: 2 }
      - { id: 1, code: "YES", label: "Yes", sort_order: 1 }
questions:
  - { id: 10, dimension_id: 1, code: "1.1", text: "RPA tool in use?", question_type: single_choice, scale: yes_no }
  - { id: 20, dimension_id: 2, code: "2.1", text: "Rule based?", question_type: single_choice, scale: yes_no }
option_scores:
  - question_id: 10
    rpa: { 1: not_applicable, 2: exclude }
  - question_id: 20
    rpa: { 1: 5, 2: 1 }
    ipa: { 1: 4.5 }
answers:
  - { question_id: 10, option_ids: [1] }
"#;

    #[test]
    fn parses_questionnaire_and_answers() {
        let fixture = Fixture::from_yaml(SMALL).unwrap();
        let questionnaire = &fixture.questionnaire;

        assert_eq!(questionnaire.version_id(), QuestionnaireVersionId::new(4));
        assert_eq!(questionnaire.dimensions().len(), 2);
        assert!(!questionnaire.dimension(DimensionId::new(2)).unwrap().participates_in_total);
        assert!(questionnaire.dimension(DimensionId::new(1)).unwrap().is_shared);
        assert!(!questionnaire.dimension(DimensionId::new(2)).unwrap().is_shared);
        assert_eq!(questionnaire.option_scores().len(), 5);
        assert_eq!(fixture.answers.len(), 1);
        assert_eq!(fixture.answers[0].option_ids, vec![OptionId::new(1)]);
    }

    #[test]
    fn scale_options_are_ordered() {
        let fixture = Fixture::from_yaml(SMALL).unwrap();
        let scale = fixture.questionnaire.scale("yes_no").unwrap();
        assert_eq!(scale.options[0].code, "YES");
    }

    #[test]
    fn score_cells_map_to_contributions() {
        let fixture = Fixture::from_yaml(SMALL).unwrap();
        let table = fixture.questionnaire.option_scores();

        let exclusion = table
            .lookup(QuestionId::new(10), OptionId::new(2), Strategy::Rpa)
            .unwrap();
        assert_eq!(exclusion.contribution(), Contribution::Exclusion);

        let scored = table
            .lookup(QuestionId::new(20), OptionId::new(1), Strategy::Ipa)
            .unwrap();
        assert_eq!(scored.contribution(), Contribution::Score(4.5));
    }

    #[test]
    fn invalid_reference_is_rejected() {
        let source = SMALL.replace("dimension_id: 2", "dimension_id: 9");
        let err = Fixture::from_yaml(&source).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Invalid(QuestionnaireError::UnknownDimension { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Fixture::from_yaml("version_id: [").unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));

        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn loads_fixture_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let fixture = load_fixture(file.path()).await.unwrap();

        assert_eq!(fixture.questionnaire.name(), "Small");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_fixture(dir.path().join("absent.yaml")).await.unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
    }
}
