//! Applicability module - decides which answers are in scope.
//!
//! # Components
//!
//! - `ConditionGraph` - Visibility conditions as a dependency graph
//! - `ApplicabilityResolver` - Settles answer flags against the graph

mod condition_graph;
mod resolver;

pub use condition_graph::{ConditionGraph, SelectedOptions};
pub use resolver::{
    selected_options, ApplicabilityError, ApplicabilityResolver, ResolutionReport, DEFAULT_MAX_PASSES,
};
