//! Answer scales and their selectable options.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OptionId;

/// One selectable position on a scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub id: OptionId,
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub sort_order: i32,
    /// Marks "no answer / not applicable" positions.
    #[serde(default)]
    pub is_not_applicable: bool,
}

/// Named, ordered set of options shared by several questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub key: String,
    pub label: String,
    pub options: Vec<ScaleOption>,
}

impl Scale {
    /// Creates a scale, ordering options by their sort order.
    pub fn new(key: impl Into<String>, label: impl Into<String>, mut options: Vec<ScaleOption>) -> Self {
        options.sort_by_key(|o| o.sort_order);
        Self {
            key: key.into(),
            label: label.into(),
            options,
        }
    }

    /// Returns true if the option belongs to this scale.
    pub fn contains(&self, option_id: OptionId) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Finds an option by its stable code.
    pub fn option_by_code(&self, code: &str) -> Option<&ScaleOption> {
        self.options.iter().find(|o| o.code == code)
    }
}
