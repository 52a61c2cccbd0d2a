//! Question definitions, visibility conditions, and economic input tags.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DimensionId, OptionId, QuestionId};

/// Answer shape a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Number,
}

impl QuestionType {
    /// Returns true for question types answered by selecting scale options.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

/// How multiple conditions of one question combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicabilityLogic {
    /// Every condition must hold.
    #[default]
    All,
    /// At least one condition must hold.
    Any,
}

impl ApplicabilityLogic {
    /// Combines individual condition outcomes.
    ///
    /// An empty set of outcomes is always satisfied, regardless of logic.
    pub fn combine<I>(&self, outcomes: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut outcomes = outcomes.into_iter().peekable();
        if outcomes.peek().is_none() {
            return true;
        }
        match self {
            ApplicabilityLogic::All => outcomes.all(|met| met),
            ApplicabilityLogic::Any => outcomes.any(|met| met),
        }
    }
}

/// Requires `required_option_id` to be selected on `parent_question_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub parent_question_id: QuestionId,
    pub required_option_id: OptionId,
    #[serde(default)]
    pub sort_order: i32,
}

impl Condition {
    pub fn new(parent_question_id: QuestionId, required_option_id: OptionId) -> Self {
        Self {
            parent_question_id,
            required_option_id,
            sort_order: 0,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Numeric inputs consumed by the economic scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicInput {
    /// One-off platform setup cost (shared across processes).
    SetupCost,
    /// Implementation effort in hours.
    ImplementationHours,
    /// Annual running cost (licences, infrastructure).
    AnnualRunCost,
    /// Maintenance effort in hours per month.
    MonthlyMaintenanceHours,
    /// Process executions per month.
    MonthlyFrequency,
    /// Manual handling time per execution, in minutes.
    ManualMinutesPerRun,
    /// Remaining manual time per execution after automation, in minutes.
    ResidualMinutesPerRun,
    /// Number of processes sharing the platform. Optional, defaults to 1.
    SharedProcessCount,
}

impl EconomicInput {
    /// Inputs that must all be answered before an economic score exists.
    pub const REQUIRED: [EconomicInput; 7] = [
        EconomicInput::SetupCost,
        EconomicInput::ImplementationHours,
        EconomicInput::AnnualRunCost,
        EconomicInput::MonthlyMaintenanceHours,
        EconomicInput::MonthlyFrequency,
        EconomicInput::ManualMinutesPerRun,
        EconomicInput::ResidualMinutesPerRun,
    ];
}

/// Immutable definition of one question within a questionnaire version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: QuestionId,
    pub dimension_id: DimensionId,
    pub code: String,
    #[serde(default)]
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub unit: Option<String>,
    /// Key of the answer scale, for choice questions.
    #[serde(default)]
    pub scale: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub logic: ApplicabilityLogic,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Single-condition form predating `conditions`; only used when
    /// `conditions` is empty.
    #[serde(default)]
    pub legacy_condition: Option<Condition>,
    #[serde(default)]
    pub economic_input: Option<EconomicInput>,
}

impl QuestionDefinition {
    /// Creates an unconditional question.
    pub fn new(
        id: QuestionId,
        dimension_id: DimensionId,
        code: impl Into<String>,
        question_type: QuestionType,
    ) -> Self {
        Self {
            id,
            dimension_id,
            code: code.into(),
            text: String::new(),
            question_type,
            unit: None,
            scale: None,
            sort_order: 0,
            logic: ApplicabilityLogic::All,
            conditions: Vec::new(),
            legacy_condition: None,
            economic_input: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_logic(mut self, logic: ApplicabilityLogic) -> Self {
        self.logic = logic;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_legacy_condition(mut self, condition: Condition) -> Self {
        self.legacy_condition = Some(condition);
        self
    }

    pub fn with_economic_input(mut self, input: EconomicInput) -> Self {
        self.economic_input = Some(input);
        self
    }

    /// Conditions gating this question, in evaluation order.
    ///
    /// The explicit list wins; otherwise the legacy condition counts as one
    /// implicit condition; otherwise the question is unconditional.
    pub fn effective_conditions(&self) -> Vec<Condition> {
        if !self.conditions.is_empty() {
            let mut conditions = self.conditions.clone();
            conditions.sort_by_key(|c| c.sort_order);
            return conditions;
        }
        self.legacy_condition.into_iter().collect()
    }

    /// Returns true when at least one condition gates this question.
    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty() || self.legacy_condition.is_some()
    }
}
