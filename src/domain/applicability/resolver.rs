//! Applicability resolver - settles which answers are in scope.
//!
//! # Algorithm
//!
//! For an acyclic condition graph the questions are visited once in
//! topological order. Every parent is settled before its children, so the
//! options it contributes are final when a child is evaluated.
//!
//! If the graph contains a cycle the resolver falls back to repeated full
//! passes over a snapshot of the selected options, stopping when a pass
//! changes nothing. Hitting the pass bound while flags still change is an
//! error rather than a silent stop.
//!
//! # Edge Cases
//!
//! - A question without conditions is always applicable
//! - An answer that becomes inapplicable loses its option and numeric value,
//!   so it can no longer enable descendants
//! - Rows stored as inapplicable lose any leftover value before the first
//!   pass, so a stale value never gates a descendant
//! - Running the resolver on its own output changes nothing

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::assessment::Answer;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

use super::{ConditionGraph, SelectedOptions};

/// Default bound on resolution passes for cyclic condition graphs.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Failure to reach a stable set of applicability flags.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicabilityError {
    #[error("Applicability did not converge after {passes} passes ({} questions still changing)", .unstable.len())]
    NotConverged {
        passes: usize,
        unstable: Vec<QuestionId>,
    },
}

impl From<ApplicabilityError> for DomainError {
    fn from(err: ApplicabilityError) -> Self {
        let ApplicabilityError::NotConverged { passes, ref unstable } = err;
        let unstable = unstable
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",");
        DomainError::new(ErrorCode::ApplicabilityNotConverged, err.to_string())
            .with_detail("passes", passes.to_string())
            .with_detail("unstable_questions", unstable)
    }
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Passes over the questions, including the final unchanged pass of
    /// the bounded loop.
    pub passes: usize,
    /// Questions whose flags flipped, in order of first change.
    pub changed: Vec<QuestionId>,
}

impl ResolutionReport {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Resolves answer applicability against a condition graph.
#[derive(Debug, Clone, Copy)]
pub struct ApplicabilityResolver {
    max_passes: usize,
}

impl Default for ApplicabilityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}

impl ApplicabilityResolver {
    /// Creates a resolver; the bound applies only to cyclic graphs.
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Updates the applicability flags of `answers` in place.
    pub fn resolve(
        &self,
        graph: &ConditionGraph,
        answers: &mut [Answer],
    ) -> Result<ResolutionReport, ApplicabilityError> {
        match graph.evaluation_order() {
            Some(order) => Ok(Self::resolve_in_order(graph, &order, answers)),
            None => {
                warn!(
                    cyclic_questions = graph.cyclic_questions().len(),
                    max_passes = self.max_passes,
                    "Condition graph has a cycle, using bounded resolution"
                );
                self.resolve_iteratively(graph, answers)
            }
        }
    }

    fn resolve_in_order(
        graph: &ConditionGraph,
        order: &[QuestionId],
        answers: &mut [Answer],
    ) -> ResolutionReport {
        clear_stale_values(answers);

        // Answers outside the graph keep their flags but still count as selected.
        let mut selected = SelectedOptions::new();
        for answer in answers.iter().filter(|a| !graph.contains(a.question_id)) {
            if let (true, Some(option)) = (answer.is_applicable, answer.selected_option) {
                selected.entry(answer.question_id).or_default().insert(option);
            }
        }

        let mut changed = Vec::new();
        for &question_id in order {
            let applicable = graph.is_applicable(question_id, &selected);
            if apply(question_id, applicable, answers) {
                changed.push(question_id);
            }
            if applicable {
                let options = answers
                    .iter()
                    .filter(|a| a.question_id == question_id && a.is_applicable)
                    .filter_map(|a| a.selected_option);
                selected.entry(question_id).or_default().extend(options);
            }
        }

        debug!(changed = changed.len(), "Applicability resolved in one ordered pass");
        ResolutionReport { passes: 1, changed }
    }

    /// Bounded fixed-point loop. Each pass evaluates every question against
    /// the selection snapshot taken at the start of the pass.
    pub(crate) fn resolve_iteratively(
        &self,
        graph: &ConditionGraph,
        answers: &mut [Answer],
    ) -> Result<ResolutionReport, ApplicabilityError> {
        clear_stale_values(answers);

        let mut changed: Vec<QuestionId> = Vec::new();
        let mut seen = HashSet::new();
        let mut last_pass_changes = Vec::new();

        for pass in 1..=self.max_passes {
            let selected = selected_options(answers);
            let verdicts: Vec<(QuestionId, bool)> = graph
                .questions()
                .map(|q| (q, graph.is_applicable(q, &selected)))
                .collect();

            last_pass_changes.clear();
            for (question_id, applicable) in verdicts {
                if apply(question_id, applicable, answers) {
                    last_pass_changes.push(question_id);
                    if seen.insert(question_id) {
                        changed.push(question_id);
                    }
                }
            }

            debug!(pass, changed = last_pass_changes.len(), "Applicability pass finished");
            if last_pass_changes.is_empty() {
                return Ok(ResolutionReport { passes: pass, changed });
            }
        }

        Err(ApplicabilityError::NotConverged {
            passes: self.max_passes,
            unstable: last_pass_changes,
        })
    }
}

/// Options selected on applicable answers.
pub fn selected_options(answers: &[Answer]) -> SelectedOptions {
    let mut selected = SelectedOptions::new();
    for answer in answers.iter().filter(|a| a.is_applicable) {
        if let Some(option) = answer.selected_option {
            selected.entry(answer.question_id).or_default().insert(option);
        }
    }
    selected
}

/// Drops values still carried by rows already marked inapplicable.
fn clear_stale_values(answers: &mut [Answer]) {
    for answer in answers.iter_mut().filter(|a| !a.is_applicable && a.has_value()) {
        answer.invalidate();
    }
}

/// Aligns every row of a question with its verdict. Returns true on change.
fn apply(question_id: QuestionId, applicable: bool, answers: &mut [Answer]) -> bool {
    let mut flipped = false;
    for answer in answers.iter_mut().filter(|a| a.question_id == question_id) {
        if answer.is_applicable != applicable {
            if applicable {
                answer.is_applicable = true;
            } else {
                answer.invalidate();
            }
            flipped = true;
        }
    }
    flipped
}
