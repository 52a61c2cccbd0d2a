//! Advisory module - human-readable advice derived from dimension results.
//!
//! Kept apart from scoring: nothing here feeds back into results.

mod advice;
mod band;
mod library;

pub use advice::{
    Advice, AdviceKind, DimensionAdvice, DimensionAdvisor, PreferenceAdvice, StrategyPreference,
    SIMILARITY_THRESHOLD,
};
pub use band::{ScoreBand, Severity};
pub use library::{AdviceTemplate, AdvisoryError, AdvisoryLibrary, PreferenceCopy, Variants, FALLBACK_DIMENSION};
