//! Automation strategies scored side by side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two automation approaches every dimension is scored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Rule-based robotic process automation.
    Rpa,
    /// Intelligent process automation (document understanding, ML components).
    Ipa,
}

impl Strategy {
    /// Both strategies in the fixed order results are emitted in.
    pub const ALL: [Strategy; 2] = [Strategy::Rpa, Strategy::Ipa];

    /// Returns the display label for this strategy.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Rpa => "RPA",
            Strategy::Ipa => "IPA",
        }
    }

    /// Returns the competing strategy.
    pub fn other(&self) -> Strategy {
        match self {
            Strategy::Rpa => Strategy::Ipa,
            Strategy::Ipa => Strategy::Rpa,
        }
    }
}

/// Returned when a strategy name is neither `rpa` nor `ipa`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rpa" => Ok(Strategy::Rpa),
            "ipa" => Ok(Strategy::Ipa),
            _ => Err(UnknownStrategy(s.trim().to_string())),
        }
    }
}
