//! Option scores - what selecting an option means for each strategy.
//!
//! The table is static per questionnaire version and keyed by
//! (question, option, strategy). At most one row exists per key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{OptionId, QuestionId, Strategy};

use super::QuestionnaireError;

/// Score row for one (question, option, strategy) triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionScore {
    pub question_id: QuestionId,
    pub option_id: OptionId,
    pub strategy: Strategy,
    #[serde(default)]
    pub score: Option<f64>,
    /// Selecting this option vetoes the whole dimension for the strategy.
    #[serde(default)]
    pub is_exclusion: bool,
    /// `false` means the scale position does not apply to this strategy
    /// and contributes neither score nor exclusion.
    #[serde(default = "default_applicable")]
    pub is_applicable: bool,
}

fn default_applicable() -> bool {
    true
}

/// What one option score contributes to a dimension accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    /// Hard veto for the dimension.
    Exclusion,
    /// Numeric score to accumulate.
    Score(f64),
    /// Nothing to accumulate.
    Nothing,
}

impl OptionScore {
    /// Creates a scored row.
    pub fn scored(question_id: QuestionId, option_id: OptionId, strategy: Strategy, score: f64) -> Self {
        Self {
            question_id,
            option_id,
            strategy,
            score: Some(score),
            is_exclusion: false,
            is_applicable: true,
        }
    }

    /// Creates an exclusion row.
    pub fn exclusion(question_id: QuestionId, option_id: OptionId, strategy: Strategy) -> Self {
        Self {
            question_id,
            option_id,
            strategy,
            score: None,
            is_exclusion: true,
            is_applicable: true,
        }
    }

    /// Creates a row marking the option as structurally not applicable.
    pub fn not_applicable(question_id: QuestionId, option_id: OptionId, strategy: Strategy) -> Self {
        Self {
            question_id,
            option_id,
            strategy,
            score: None,
            is_exclusion: false,
            is_applicable: false,
        }
    }

    /// Classifies this row. Exclusion is checked before applicability.
    pub fn contribution(&self) -> Contribution {
        if self.is_exclusion {
            return Contribution::Exclusion;
        }
        match (self.is_applicable, self.score) {
            (true, Some(score)) => Contribution::Score(score),
            _ => Contribution::Nothing,
        }
    }

    fn key(&self) -> OptionScoreKey {
        OptionScoreKey {
            question_id: self.question_id,
            option_id: self.option_id,
            strategy: self.strategy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct OptionScoreKey {
    question_id: QuestionId,
    option_id: OptionId,
    strategy: Strategy,
}

/// Lookup table of option scores for one questionnaire version.
#[derive(Debug, Clone, Default)]
pub struct OptionScoreTable {
    rows: HashMap<OptionScoreKey, OptionScore>,
}

impl OptionScoreTable {
    /// Builds the table, rejecting duplicate keys.
    pub fn from_rows<I>(rows: I) -> Result<Self, QuestionnaireError>
    where
        I: IntoIterator<Item = OptionScore>,
    {
        let mut table = HashMap::new();
        for row in rows {
            if table.insert(row.key(), row).is_some() {
                return Err(QuestionnaireError::DuplicateOptionScore {
                    question_id: row.question_id,
                    option_id: row.option_id,
                    strategy: row.strategy,
                });
            }
        }
        Ok(Self { rows: table })
    }

    /// Looks up the row for a single selected option.
    pub fn lookup(
        &self,
        question_id: QuestionId,
        option_id: OptionId,
        strategy: Strategy,
    ) -> Option<&OptionScore> {
        self.rows.get(&OptionScoreKey {
            question_id,
            option_id,
            strategy,
        })
    }

    /// Looks up all existing rows for a set of selected options.
    ///
    /// Options without a row are skipped.
    pub fn lookup_all<'a>(
        &'a self,
        question_id: QuestionId,
        option_ids: &'a [OptionId],
        strategy: Strategy,
    ) -> impl Iterator<Item = &'a OptionScore> + 'a {
        option_ids
            .iter()
            .filter_map(move |option_id| self.lookup(question_id, *option_id, strategy))
    }

    /// Iterates over all rows in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionScore> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
