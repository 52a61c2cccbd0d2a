//! Questionnaire module - immutable definitions per questionnaire version.
//!
//! # Components
//!
//! - `DimensionDefinition` - Themed question group with explicit scoring configuration
//! - `QuestionDefinition` - Question type, scale, visibility conditions, economic binding
//! - `Scale` / `ScaleOption` - Selectable answer positions
//! - `OptionScoreTable` - (question, option, strategy) lookup of scores and vetoes
//! - `Questionnaire` - Validated aggregate tying the above together

mod dimension;
mod option_score;
mod question;
mod questionnaire;
mod scale;

pub use dimension::{CalculationMethod, DimensionDefinition};
pub use option_score::{Contribution, OptionScore, OptionScoreTable};
pub use question::{ApplicabilityLogic, Condition, EconomicInput, QuestionDefinition, QuestionType};
pub use questionnaire::{Questionnaire, QuestionnaireError};
pub use scale::{Scale, ScaleOption};
