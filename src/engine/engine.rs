//! Rule engine construction and the two evaluators.
//!
//! [`RuleEngine::build`] validates the rule graph once; after that the engine
//! is an immutable snapshot and both [`RuleEngine::evaluate`] (concrete
//! routing) and [`RuleEngine::analyze`] (symbolic range propagation) are
//! total, pure functions over it.

use super::types::{Record, Step, Target, Verdict, Workflow};
use crate::domain::HyperRect;
use crate::error::BuildError;
use std::collections::HashMap;

/// Label of the workflow where classification starts unless overridden.
pub const DEFAULT_ENTRY: &str = "in";

/// A validated, read-only graph of rule workflows.
///
/// # Usage
///
/// ```
/// use rulesieve::domain::{HyperRect, Range};
/// use rulesieve::engine::{RuleEngine, Verdict};
/// use rulesieve::parse::parse_input;
///
/// let input = parse_input("in{x<10:A,R}\n\n{x=3}\n").unwrap();
/// let engine = RuleEngine::build(input.workflows).unwrap();
///
/// assert_eq!(engine.evaluate(&input.records[0]), Verdict::Accept);
///
/// let domain = HyperRect::uniform(["x"], Range::new(1, 4000));
/// assert_eq!(engine.accepted_volume(&domain), 9);
/// ```
#[derive(Debug, Clone)]
pub struct RuleEngine {
    workflows: HashMap<String, Workflow>,
    entry: String,
}

impl RuleEngine {
    /// Builds an engine starting at [`DEFAULT_ENTRY`].
    ///
    /// The whole graph is validated eagerly: structural defects surface here,
    /// never during evaluation. See [`BuildError`] for the taxonomy.
    pub fn build(workflows: Vec<Workflow>) -> Result<Self, BuildError> {
        Self::build_with_entry(workflows, DEFAULT_ENTRY)
    }

    /// Builds an engine with an explicit entry workflow label.
    pub fn build_with_entry(
        workflows: Vec<Workflow>,
        entry: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let entry = entry.into();

        let mut map = HashMap::with_capacity(workflows.len());
        for workflow in workflows {
            if workflow.label == "A" || workflow.label == "R" {
                return Err(BuildError::ReservedLabel(workflow.label));
            }
            check_fallthrough(&workflow)?;
            let label = workflow.label.clone();
            if map.insert(label.clone(), workflow).is_some() {
                return Err(BuildError::DuplicateWorkflow(label));
            }
        }

        for workflow in map.values() {
            for step in &workflow.steps {
                if let Target::Workflow(name) = step.target() {
                    if !map.contains_key(name) {
                        return Err(BuildError::UnknownTarget {
                            workflow: workflow.label.clone(),
                            target: name.clone(),
                        });
                    }
                }
            }
        }

        if !map.contains_key(&entry) {
            return Err(BuildError::MissingEntry(entry));
        }

        check_acyclic(&map)?;

        Ok(Self {
            workflows: map,
            entry,
        })
    }

    /// Label of the entry workflow.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Number of workflows in the graph.
    pub fn workflow_count(&self) -> usize {
        self.workflows.len()
    }

    /// Looks up a workflow by label.
    pub fn get(&self, label: &str) -> Option<&Workflow> {
        self.workflows.get(label)
    }

    fn workflow(&self, label: &str) -> &Workflow {
        self.workflows
            .get(label)
            .unwrap_or_else(|| panic!("workflow '{label}' vanished after validation"))
    }

    /// Classifies one concrete record.
    ///
    /// Steps are tried strictly in declaration order; the first matching
    /// conditional (or the trailing fallthrough) names the next target.
    /// Workflow-to-workflow transfer is iterative reassignment, which is
    /// equivalent to recursive dispatch on an acyclic graph.
    pub fn evaluate(&self, record: &Record) -> Verdict {
        let mut label = self.entry.as_str();
        loop {
            match self.workflow(label).route(record) {
                Target::Terminal(verdict) => return *verdict,
                Target::Workflow(next) => label = next,
            }
        }
    }

    /// Symbolically partitions `domain` into disjoint `(rectangle, verdict)`
    /// pairs whose volumes sum exactly to `domain.volume()`.
    ///
    /// Every conditional step splits the current rectangle into the matching
    /// half (dispatched to the step's target) and the complement (carried to
    /// the next step of the same workflow). Empty halves are dropped and
    /// never recursed into, which is what keeps the partition free of
    /// duplicate or zero-volume members. Reject rectangles are emitted too;
    /// dropping them would make the partition impossible to check for
    /// completeness.
    pub fn analyze(&self, domain: &HyperRect) -> Vec<(HyperRect, Verdict)> {
        let mut partition = Vec::new();
        if !domain.is_empty() {
            self.analyze_steps(&self.workflow(&self.entry).steps, domain.clone(), &mut partition);
        }
        partition
    }

    fn analyze_steps(
        &self,
        steps: &[Step],
        mut current: HyperRect,
        partition: &mut Vec<(HyperRect, Verdict)>,
    ) {
        for step in steps {
            match step {
                Step::Conditional { condition, target } => {
                    let (matched, rest) = condition.split(&current);
                    if !matched.is_empty() {
                        self.dispatch(target, matched, partition);
                    }
                    if rest.is_empty() {
                        return; // nothing left to route through this workflow
                    }
                    current = rest;
                }
                Step::Fallthrough { target } => {
                    self.dispatch(target, current, partition);
                    return;
                }
            }
        }
        unreachable!("validated workflow ran out of steps without a fallthrough");
    }

    fn dispatch(&self, target: &Target, rect: HyperRect, partition: &mut Vec<(HyperRect, Verdict)>) {
        match target {
            Target::Terminal(verdict) => partition.push((rect, *verdict)),
            Target::Workflow(label) => {
                self.analyze_steps(&self.workflow(label).steps, rect, partition)
            }
        }
    }

    /// Count of domain members the rules accept: the summed volume of all
    /// Accept rectangles in [`RuleEngine::analyze`]'s partition.
    pub fn accepted_volume(&self, domain: &HyperRect) -> i64 {
        self.analyze(domain)
            .iter()
            .filter(|(_, verdict)| *verdict == Verdict::Accept)
            .map(|(rect, _)| rect.volume())
            .sum()
    }
}

#[cfg(feature = "parallel")]
impl RuleEngine {
    /// Parallel variant of [`RuleEngine::analyze`].
    ///
    /// The two halves of every split are independent, so each split forks a
    /// `rayon::join`: one side dispatches the matching rectangle, the other
    /// continues the remaining steps. Results are concatenated left-to-right,
    /// so the output order is identical to the sequential variant.
    pub fn analyze_parallel(&self, domain: &HyperRect) -> Vec<(HyperRect, Verdict)> {
        if domain.is_empty() {
            return Vec::new();
        }
        self.par_steps(&self.workflow(&self.entry).steps, domain.clone())
    }

    fn par_steps(&self, steps: &[Step], current: HyperRect) -> Vec<(HyperRect, Verdict)> {
        match steps.split_first() {
            Some((Step::Conditional { condition, target }, remaining)) => {
                let (matched, rest) = condition.split(&current);
                let (mut left, right) = rayon::join(
                    || {
                        if matched.is_empty() {
                            Vec::new()
                        } else {
                            self.par_target(target, matched)
                        }
                    },
                    || {
                        if rest.is_empty() {
                            Vec::new()
                        } else {
                            self.par_steps(remaining, rest)
                        }
                    },
                );
                left.extend(right);
                left
            }
            Some((Step::Fallthrough { target }, _)) => self.par_target(target, current),
            None => unreachable!("validated workflow ran out of steps without a fallthrough"),
        }
    }

    fn par_target(&self, target: &Target, rect: HyperRect) -> Vec<(HyperRect, Verdict)> {
        match target {
            Target::Terminal(verdict) => vec![(rect, *verdict)],
            Target::Workflow(label) => self.par_steps(&self.workflow(label).steps, rect),
        }
    }
}

/// Each workflow must end with its single fallthrough step.
fn check_fallthrough(workflow: &Workflow) -> Result<(), BuildError> {
    match workflow.steps.split_last() {
        Some((Step::Fallthrough { .. }, init))
            if !init.iter().any(|s| matches!(s, Step::Fallthrough { .. })) =>
        {
            Ok(())
        }
        _ => Err(BuildError::MisplacedFallthrough(workflow.label.clone())),
    }
}

/// Depth-first search over workflow targets; a grey-node hit is a cycle.
fn check_acyclic(workflows: &HashMap<String, Workflow>) -> Result<(), BuildError> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        InProgress,
        Done,
    }

    fn visit<'a>(
        label: &'a str,
        workflows: &'a HashMap<String, Workflow>,
        marks: &mut HashMap<&'a str, Mark>,
    ) -> Result<(), BuildError> {
        match marks.get(label) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => return Err(BuildError::CyclicRules(label.to_string())),
            None => {}
        }
        marks.insert(label, Mark::InProgress);
        if let Some(workflow) = workflows.get(label) {
            for step in &workflow.steps {
                if let Target::Workflow(next) = step.target() {
                    visit(next, workflows, marks)?;
                }
            }
        }
        marks.insert(label, Mark::Done);
        Ok(())
    }

    let mut marks = HashMap::new();
    for label in workflows.keys() {
        visit(label, workflows, &mut marks)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;
    use crate::domain::Range;
    use crate::parse::parse_input;

    #[test]
    fn test_parallel_matches_sequential() {
        let text = "in{s<1351:px,qqz}\npx{a<2006:A,m>2090:A,R}\nqqz{s>2770:A,m<1801:R,A}\n";
        let engine = RuleEngine::build(parse_input(text).unwrap().workflows).unwrap();
        let domain = HyperRect::uniform(["x", "m", "a", "s"], Range::new(1, 4000));
        assert_eq!(engine.analyze_parallel(&domain), engine.analyze(&domain));
    }
}
