//! Score bands for dimension means.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation severity of a piece of advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

/// Bucket of a 1-5 dimension mean. Upper bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Critical,
    High,
    Medium,
    Good,
    Excellent,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 5] = [
        ScoreBand::Critical,
        ScoreBand::High,
        ScoreBand::Medium,
        ScoreBand::Good,
        ScoreBand::Excellent,
    ];

    /// Classifies a score: <1.5, <2.5, <3.3, <4.2, otherwise excellent.
    pub fn classify(score: f64) -> Self {
        if score < 1.5 {
            ScoreBand::Critical
        } else if score < 2.5 {
            ScoreBand::High
        } else if score < 3.3 {
            ScoreBand::Medium
        } else if score < 4.2 {
            ScoreBand::Good
        } else {
            ScoreBand::Excellent
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ScoreBand::Critical => "critical",
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Good => "good",
            ScoreBand::Excellent => "excellent",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScoreBand::Critical => "Critical",
            ScoreBand::High => "High risk",
            ScoreBand::Medium => "Needs improvement",
            ScoreBand::Good => "Solid foundation",
            ScoreBand::Excellent => "Very good",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ScoreBand::Critical | ScoreBand::High => Severity::Error,
            ScoreBand::Medium => Severity::Warning,
            ScoreBand::Good => Severity::Info,
            ScoreBand::Excellent => Severity::Success,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
