//! Core rule-graph types.

use crate::domain::HyperRect;
use std::collections::BTreeMap;

/// A concrete record: one integer value per declared field.
///
/// Immutable once constructed; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    values: BTreeMap<String, i64>,
}

impl Record {
    /// Creates a record from explicit field values.
    pub fn new(values: BTreeMap<String, i64>) -> Self {
        Self { values }
    }

    /// The value of a single field, if present.
    pub fn get(&self, field: &str) -> Option<i64> {
        self.values.get(field).copied()
    }

    /// Sum of all field values (the record's rating).
    pub fn total(&self) -> i64 {
        self.values.values().sum()
    }

    /// Iterates over `(field, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    /// Field value strictly below the threshold.
    LessThan,
    /// Field value strictly above the threshold.
    GreaterThan,
}

/// A pure predicate on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Field the predicate inspects.
    pub field: String,
    /// Comparison operator.
    pub op: Op,
    /// Comparison threshold.
    pub threshold: i64,
}

impl Condition {
    /// Whether a concrete record satisfies the predicate.
    ///
    /// # Panics
    /// Panics if the record lacks the condition's field; that is a defect in
    /// how the record was built, never a per-record outcome.
    pub fn matches(&self, record: &Record) -> bool {
        let value = record
            .get(&self.field)
            .unwrap_or_else(|| panic!("record missing field '{}'", self.field));
        match self.op {
            Op::LessThan => value < self.threshold,
            Op::GreaterThan => value > self.threshold,
        }
    }

    /// Splits a rectangle along this condition's field: `(matched, rest)`.
    ///
    /// `matched` covers exactly the records satisfying the predicate, `rest`
    /// the complement. Either side may come back empty and must then be
    /// dropped by the caller.
    pub fn split(&self, rect: &HyperRect) -> (HyperRect, HyperRect) {
        let range = rect
            .get(&self.field)
            .unwrap_or_else(|| panic!("rectangle missing field '{}'", self.field));
        let (matched, rest) = match self.op {
            Op::LessThan => range.split_less_than(self.threshold),
            Op::GreaterThan => range.split_greater_than(self.threshold),
        };
        (
            rect.with_range(&self.field, matched),
            rect.with_range(&self.field, rest),
        )
    }
}

/// Terminal outcome of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Accept,
    Reject,
}

/// Where a step sends its payload.
///
/// Both evaluators dispatch on this tag: a terminal ends classification, a
/// workflow name continues it. Resolving target labels into this enum at
/// parse time keeps the dispatch logic in one exhaustive match instead of
/// scattered string comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Classification ends with this verdict.
    Terminal(Verdict),
    /// Classification continues in the named workflow.
    Workflow(String),
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Routes to `target` only when `condition` holds.
    Conditional { condition: Condition, target: Target },
    /// Routes to `target` unconditionally. Must be the last step.
    Fallthrough { target: Target },
}

impl Step {
    /// The step's target, regardless of variant.
    pub fn target(&self) -> &Target {
        match self {
            Step::Conditional { target, .. } => target,
            Step::Fallthrough { target } => target,
        }
    }
}

/// A named, ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workflow {
    /// Unique label. `A` and `R` are reserved and never valid here.
    pub label: String,
    /// Steps, tried strictly in declaration order.
    pub steps: Vec<Step>,
}

impl Workflow {
    /// Creates a workflow from a label and its ordered steps.
    pub fn new(label: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            label: label.into(),
            steps,
        }
    }

    /// Routes a concrete record: the first conditional step whose predicate
    /// holds, or the trailing fallthrough, names the target.
    pub fn route(&self, record: &Record) -> &Target {
        for step in &self.steps {
            match step {
                Step::Conditional { condition, target } if condition.matches(record) => {
                    return target
                }
                Step::Fallthrough { target } => return target,
                Step::Conditional { .. } => {}
            }
        }
        unreachable!("workflow '{}' has no fallthrough step", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Range;

    fn record(entries: &[(&str, i64)]) -> Record {
        Record::new(entries.iter().map(|&(f, v)| (f.to_string(), v)).collect())
    }

    fn lt(field: &str, threshold: i64) -> Condition {
        Condition {
            field: field.to_string(),
            op: Op::LessThan,
            threshold,
        }
    }

    fn gt(field: &str, threshold: i64) -> Condition {
        Condition {
            field: field.to_string(),
            op: Op::GreaterThan,
            threshold,
        }
    }

    #[test]
    fn test_record_total() {
        let r = record(&[("x", 787), ("m", 2655), ("a", 1222), ("s", 2876)]);
        assert_eq!(r.total(), 7540);
    }

    #[test]
    fn test_condition_matches_boundaries() {
        let r = record(&[("a", 2006)]);
        assert!(!lt("a", 2006).matches(&r)); // strict
        assert!(lt("a", 2007).matches(&r));
        assert!(!gt("a", 2006).matches(&r)); // strict
        assert!(gt("a", 2005).matches(&r));
    }

    #[test]
    #[should_panic(expected = "missing field")]
    fn test_condition_on_missing_field_panics() {
        lt("z", 1).matches(&record(&[("a", 1)]));
    }

    #[test]
    fn test_condition_split_covers_rectangle() {
        let rect = HyperRect::uniform(["a", "b"], Range::new(1, 100));
        let (matched, rest) = gt("a", 30).split(&rect);
        assert_eq!(matched.get("a"), Some(Range::new(31, 100)));
        assert_eq!(rest.get("a"), Some(Range::new(1, 30)));
        // untouched field is carried through both halves
        assert_eq!(matched.get("b"), Some(Range::new(1, 100)));
        assert_eq!(rest.get("b"), Some(Range::new(1, 100)));
        assert_eq!(matched.volume() + rest.volume(), rect.volume());
    }

    #[test]
    fn test_route_first_match_wins() {
        // px{a<2006:qkq,m>2090:A,rfg}
        let wf = Workflow::new(
            "px",
            vec![
                Step::Conditional {
                    condition: lt("a", 2006),
                    target: Target::Workflow("qkq".to_string()),
                },
                Step::Conditional {
                    condition: gt("m", 2090),
                    target: Target::Terminal(Verdict::Accept),
                },
                Step::Fallthrough {
                    target: Target::Workflow("rfg".to_string()),
                },
            ],
        );

        let r = record(&[("x", 787), ("m", 2655), ("a", 1222), ("s", 2876)]);
        assert_eq!(wf.route(&r), &Target::Workflow("qkq".to_string()));

        let r = record(&[("x", 787), ("m", 2655), ("a", 3000), ("s", 2876)]);
        assert_eq!(wf.route(&r), &Target::Terminal(Verdict::Accept));

        let r = record(&[("x", 787), ("m", 1), ("a", 3000), ("s", 2876)]);
        assert_eq!(wf.route(&r), &Target::Workflow("rfg".to_string()));
    }
}
