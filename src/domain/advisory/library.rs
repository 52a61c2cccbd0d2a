//! Advisory library - advice copy keyed by dimension, band and strategy.
//!
//! The copy is data, not logic. It is read from a YAML document with this
//! shape:
//!
//! ```yaml
//! dimensions:
//!   "<dimension code>" | _fallback:
//!     bands:
//!       <band>: { generic: {text, actions}, rpa: {...}, ipa: {...} }
//!     fallback_band: { generic: {...} }
//! default_actions: { <band>: [...] }
//! excluded: { rpa: {...}, ipa: {...} }
//! unscored: { generic: {...} }
//! preference: { focus: {...}, similar: {...}, prefer: {...} }
//! ```
//!
//! Lookups fall back from the dimension to `_fallback`, from the band to
//! `fallback_band` and from the strategy variant to `generic`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Strategy};

use super::ScoreBand;

/// Key of the dimension entry used when a code has no entry of its own.
pub const FALLBACK_DIMENSION: &str = "_fallback";

static EMBEDDED_YAML: &str = include_str!("library.yaml");

static EMBEDDED: Lazy<Result<AdvisoryLibrary, AdvisoryError>> =
    Lazy::new(|| AdvisoryLibrary::from_yaml(EMBEDDED_YAML));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisoryError {
    #[error("Advisory library is malformed: {0}")]
    Malformed(String),
}

impl From<AdvisoryError> for DomainError {
    fn from(err: AdvisoryError) -> Self {
        DomainError::new(ErrorCode::InternalError, err.to_string())
    }
}

/// Text template with follow-up actions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdviceTemplate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Strategy-specific variants of a template with a generic default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Variants {
    #[serde(default)]
    pub generic: Option<AdviceTemplate>,
    #[serde(default)]
    pub rpa: Option<AdviceTemplate>,
    #[serde(default)]
    pub ipa: Option<AdviceTemplate>,
}

impl Variants {
    /// Merges the strategy-specific template over the generic one, field
    /// by field. `None` when neither exists.
    pub fn for_strategy(&self, strategy: Strategy) -> Option<AdviceTemplate> {
        let specific = match strategy {
            Strategy::Rpa => self.rpa.as_ref(),
            Strategy::Ipa => self.ipa.as_ref(),
        };
        match (specific, self.generic.as_ref()) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (Some(specific), Some(generic)) => Some(AdviceTemplate {
                text: specific.text.clone().or_else(|| generic.text.clone()),
                actions: if specific.actions.is_empty() {
                    generic.actions.clone()
                } else {
                    specific.actions.clone()
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct DimensionEntry {
    #[serde(default)]
    bands: HashMap<ScoreBand, Variants>,
    #[serde(default)]
    fallback_band: Option<Variants>,
}

impl DimensionEntry {
    fn band(&self, band: ScoreBand) -> Option<&Variants> {
        self.bands.get(&band).or(self.fallback_band.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreferenceCopy {
    #[serde(default)]
    pub focus: Variants,
    #[serde(default)]
    pub similar: Variants,
    #[serde(default)]
    pub prefer: Variants,
}

/// Parsed advisory library.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdvisoryLibrary {
    #[serde(default)]
    dimensions: HashMap<String, DimensionEntry>,
    #[serde(default)]
    default_actions: HashMap<ScoreBand, Vec<String>>,
    #[serde(default)]
    excluded: Variants,
    #[serde(default)]
    unscored: Variants,
    #[serde(default)]
    preference: PreferenceCopy,
}

impl AdvisoryLibrary {
    /// Parses a library document.
    pub fn from_yaml(source: &str) -> Result<Self, AdvisoryError> {
        serde_yaml::from_str(source).map_err(|e| AdvisoryError::Malformed(e.to_string()))
    }

    /// The library shipped with the crate.
    pub fn embedded() -> Result<&'static AdvisoryLibrary, AdvisoryError> {
        match &*EMBEDDED {
            Ok(library) => Ok(library),
            Err(err) => Err(err.clone()),
        }
    }

    /// Template for a scored dimension, following the fallback path.
    pub fn template(
        &self,
        dimension_code: &str,
        band: ScoreBand,
        strategy: Strategy,
    ) -> Option<AdviceTemplate> {
        let own = self.dimensions.get(dimension_code);
        let fallback = self.dimensions.get(FALLBACK_DIMENSION);
        own.and_then(|d| d.band(band))
            .or_else(|| fallback.and_then(|d| d.band(band)))
            .and_then(|variants| variants.for_strategy(strategy))
    }

    /// Actions used when a template lists none.
    pub fn default_actions(&self, band: ScoreBand) -> &[String] {
        self.default_actions.get(&band).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn excluded(&self, strategy: Strategy) -> Option<AdviceTemplate> {
        self.excluded.for_strategy(strategy)
    }

    pub fn unscored(&self, strategy: Strategy) -> Option<AdviceTemplate> {
        self.unscored.for_strategy(strategy)
    }

    pub fn preference(&self) -> &PreferenceCopy {
        &self.preference
    }
}
