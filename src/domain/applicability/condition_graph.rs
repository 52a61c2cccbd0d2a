//! Condition graph - which answers gate which questions.
//!
//! Each question is a node; every condition adds an edge from the parent
//! question to the dependent one. When the graph is acyclic a topological
//! order is computed once at construction, so one pass over that order
//! settles every question.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::foundation::{OptionId, QuestionId};
use crate::domain::questionnaire::{ApplicabilityLogic, Condition, Questionnaire};

/// Options currently selected on applicable answers, by question.
pub type SelectedOptions = HashMap<QuestionId, HashSet<OptionId>>;

#[derive(Debug, Clone)]
struct Node {
    question_id: QuestionId,
    logic: ApplicabilityLogic,
    conditions: Vec<Condition>,
    children: Vec<usize>,
}

/// Dependency graph of question visibility conditions.
#[derive(Debug, Clone)]
pub struct ConditionGraph {
    nodes: Vec<Node>,
    index: HashMap<QuestionId, usize>,
    topological_order: Option<Vec<usize>>,
    cyclic: Vec<QuestionId>,
}

impl ConditionGraph {
    /// Builds the graph for all questions of a questionnaire.
    pub fn build(questionnaire: &Questionnaire) -> Self {
        let mut nodes: Vec<Node> = questionnaire
            .questions()
            .iter()
            .map(|q| Node {
                question_id: q.id,
                logic: q.logic,
                conditions: q.effective_conditions(),
                children: Vec::new(),
            })
            .collect();

        let index: HashMap<QuestionId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.question_id, i))
            .collect();

        let mut in_degree = vec![0usize; nodes.len()];
        for child in 0..nodes.len() {
            let parents: HashSet<usize> = nodes[child]
                .conditions
                .iter()
                .filter_map(|c| index.get(&c.parent_question_id).copied())
                .collect();
            let mut parents: Vec<usize> = parents.into_iter().collect();
            parents.sort_unstable();
            for parent in parents {
                nodes[parent].children.push(child);
                in_degree[child] += 1;
            }
        }

        // Kahn's algorithm, seeded in questionnaire order.
        let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(nodes.len());
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &child in &nodes[node].children {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        let (topological_order, cyclic) = if order.len() == nodes.len() {
            (Some(order), Vec::new())
        } else {
            let cyclic = (0..nodes.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| nodes[i].question_id)
                .collect();
            (None, cyclic)
        };

        Self {
            nodes,
            index,
            topological_order,
            cyclic,
        }
    }

    /// Returns true if no condition chain leads back to its own question.
    pub fn is_acyclic(&self) -> bool {
        self.topological_order.is_some()
    }

    /// Questions on, or downstream of, a condition cycle.
    pub fn cyclic_questions(&self) -> &[QuestionId] {
        &self.cyclic
    }

    /// Questions with every parent ahead of its children, if acyclic.
    pub fn evaluation_order(&self) -> Option<Vec<QuestionId>> {
        self.topological_order
            .as_ref()
            .map(|order| order.iter().map(|&i| self.nodes[i].question_id).collect())
    }

    /// All questions in questionnaire order.
    pub fn questions(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.nodes.iter().map(|n| n.question_id)
    }

    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.index.contains_key(&question_id)
    }

    /// Decides whether a question is applicable given the selected options.
    ///
    /// Unknown questions and questions without conditions are applicable.
    pub fn is_applicable(&self, question_id: QuestionId, selected: &SelectedOptions) -> bool {
        let Some(node) = self.index.get(&question_id).map(|&i| &self.nodes[i]) else {
            return true;
        };
        node.logic.combine(node.conditions.iter().map(|c| {
            selected
                .get(&c.parent_question_id)
                .map(|options| options.contains(&c.required_option_id))
                .unwrap_or(false)
        }))
    }
}
