//! Per-dimension advice built from results and the advisory library.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::DimensionResult;
use crate::domain::foundation::{DimensionId, Strategy};
use crate::domain::questionnaire::DimensionDefinition;

use super::{AdviceTemplate, AdvisoryLibrary, ScoreBand, Severity};

/// Score gap below which both strategies count as similarly suited.
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "band", rename_all = "snake_case")]
pub enum AdviceKind {
    Scored(ScoreBand),
    Excluded,
    Unscored,
}

/// Advice for one strategy in one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub strategy: Strategy,
    pub kind: AdviceKind,
    pub severity: Severity,
    pub title: String,
    pub text: String,
    pub actions: Vec<String>,
}

/// Which strategy a single dimension favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "strategy", rename_all = "snake_case")]
pub enum StrategyPreference {
    /// Only this strategy is available or scored.
    Focus(Strategy),
    Similar,
    Prefer(Strategy),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceAdvice {
    pub preference: StrategyPreference,
    pub severity: Severity,
    pub title: String,
    pub text: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAdvice {
    pub dimension_id: DimensionId,
    pub rpa: Advice,
    pub ipa: Advice,
    pub preference: Option<PreferenceAdvice>,
}

/// Placeholder values of one rendering.
struct Placeholders<'a> {
    dimension_name: &'a str,
    strategy: Strategy,
    score: Option<f64>,
    rpa_score: Option<f64>,
    ipa_score: Option<f64>,
}

impl Placeholders<'_> {
    fn render(&self, template: &str) -> String {
        template
            .replace("{dimension_name}", self.dimension_name)
            .replace("{strategy}", self.strategy.label())
            .replace("{score}", &format_score(self.score))
            .replace("{rpa_score}", &format_score(self.rpa_score))
            .replace("{ipa_score}", &format_score(self.ipa_score))
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
}

/// Builds advice for dimensions from a library.
pub struct DimensionAdvisor<'a> {
    library: &'a AdvisoryLibrary,
}

impl<'a> DimensionAdvisor<'a> {
    pub fn new(library: &'a AdvisoryLibrary) -> Self {
        Self { library }
    }

    /// Advice for both strategies of one dimension plus the preference.
    pub fn advise(
        &self,
        dimension: &DimensionDefinition,
        rpa: &DimensionResult,
        ipa: &DimensionResult,
    ) -> DimensionAdvice {
        DimensionAdvice {
            dimension_id: dimension.id,
            rpa: self.strategy_advice(dimension, rpa, rpa, ipa),
            ipa: self.strategy_advice(dimension, ipa, rpa, ipa),
            preference: self.preference_advice(dimension, rpa, ipa),
        }
    }

    fn strategy_advice(
        &self,
        dimension: &DimensionDefinition,
        result: &DimensionResult,
        rpa: &DimensionResult,
        ipa: &DimensionResult,
    ) -> Advice {
        let strategy = result.strategy;
        let placeholders = Placeholders {
            dimension_name: &dimension.name,
            strategy,
            score: result.score,
            rpa_score: rpa.score,
            ipa_score: ipa.score,
        };

        if result.is_excluded {
            let template = self.library.excluded(strategy).unwrap_or_default();
            return Advice {
                strategy,
                kind: AdviceKind::Excluded,
                severity: Severity::Error,
                title: format!("{}: {} excluded", dimension.name, strategy),
                text: template
                    .text
                    .map(|t| placeholders.render(&t))
                    .unwrap_or_else(|| format!("{strategy} was excluded for this dimension.")),
                actions: template.actions,
            };
        }

        let Some(score) = result.score else {
            let template = self.library.unscored(strategy).unwrap_or_default();
            return Advice {
                strategy,
                kind: AdviceKind::Unscored,
                severity: Severity::Info,
                title: format!("{}: {} not scored", dimension.name, strategy),
                text: template
                    .text
                    .map(|t| placeholders.render(&t))
                    .unwrap_or_else(|| format!("There is no {strategy} score for this dimension.")),
                actions: template.actions,
            };
        };

        let band = ScoreBand::classify(score);
        let AdviceTemplate { text, actions } = self
            .library
            .template(&dimension.code, band, strategy)
            .unwrap_or_default();
        let text = match text {
            Some(text) => placeholders.render(&text),
            None => format!(
                "{}: score {score:.1}/5, {}. Review the answers and derive targeted improvements.",
                dimension.name,
                band.title().to_lowercase()
            ),
        };
        let actions = if actions.is_empty() {
            self.library.default_actions(band).to_vec()
        } else {
            actions
        };

        Advice {
            strategy,
            kind: AdviceKind::Scored(band),
            severity: band.severity(),
            title: format!("{}: {} ({score:.1}/5)", dimension.name, band.title()),
            text,
            actions,
        }
    }

    fn preference_advice(
        &self,
        dimension: &DimensionDefinition,
        rpa: &DimensionResult,
        ipa: &DimensionResult,
    ) -> Option<PreferenceAdvice> {
        let preference = Self::preference(rpa, ipa)?;
        let copy = self.library.preference();
        let (variants, strategy, severity, title) = match preference {
            StrategyPreference::Focus(s) => (
                &copy.focus,
                s,
                Severity::Info,
                format!("{}: focus on {s}", dimension.name),
            ),
            StrategyPreference::Similar => (
                &copy.similar,
                Strategy::Rpa,
                Severity::Info,
                format!("{}: RPA and IPA similarly suited", dimension.name),
            ),
            StrategyPreference::Prefer(s) => (
                &copy.prefer,
                s,
                Severity::Success,
                format!("{}: prefer {s}", dimension.name),
            ),
        };

        let placeholders = Placeholders {
            dimension_name: &dimension.name,
            strategy,
            score: match strategy {
                Strategy::Rpa => rpa.score,
                Strategy::Ipa => ipa.score,
            },
            rpa_score: rpa.score,
            ipa_score: ipa.score,
        };
        let template = variants.for_strategy(strategy).unwrap_or_default();

        Some(PreferenceAdvice {
            preference,
            severity,
            text: template
                .text
                .map(|t| placeholders.render(&t))
                .unwrap_or_else(|| title.clone()),
            title,
            actions: template.actions,
        })
    }

    /// Compares the two strategies within one dimension.
    ///
    /// `None` when neither strategy is available.
    pub fn preference(rpa: &DimensionResult, ipa: &DimensionResult) -> Option<StrategyPreference> {
        let available = |r: &DimensionResult| if r.is_excluded { None } else { r.score };
        match (available(rpa), available(ipa)) {
            (None, None) => None,
            (Some(_), None) => Some(StrategyPreference::Focus(Strategy::Rpa)),
            (None, Some(_)) => Some(StrategyPreference::Focus(Strategy::Ipa)),
            (Some(rpa), Some(ipa)) => {
                let diff = rpa - ipa;
                if diff.abs() < SIMILARITY_THRESHOLD {
                    Some(StrategyPreference::Similar)
                } else if diff > 0.0 {
                    Some(StrategyPreference::Prefer(Strategy::Rpa))
                } else {
                    Some(StrategyPreference::Prefer(Strategy::Ipa))
                }
            }
        }
    }
}
