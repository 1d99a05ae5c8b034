//! Ruleset text parsing.
//!
//! Input text carries two blocks separated by a blank line:
//!
//! - one workflow per line, `label{step,step,...}` where each step is
//!   `field<threshold:target`, `field>threshold:target`, or a bare `target`
//!   (valid only as the final step);
//! - one record per line, `{field=value,field=value,...}`, fields in any
//!   order.
//!
//! The reserved targets `A` and `R` resolve to terminal verdicts at parse
//! time; every other target is a workflow reference, resolved (and validated)
//! by [`RuleEngine::build`](crate::engine::RuleEngine::build).
//!
//! Parsing aborts on the first malformed line; no partial result is returned.

use crate::engine::{Condition, Op, Record, Step, Target, Verdict, Workflow};
use crate::error::BuildError;
use std::collections::BTreeMap;

/// Parsed ruleset text: the workflow block and the record block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetInput {
    /// Workflows in declaration order.
    pub workflows: Vec<Workflow>,
    /// Records in declaration order.
    pub records: Vec<Record>,
}

/// Parses ruleset text into workflows and records.
///
/// # Examples
///
/// ```
/// use rulesieve::parse::parse_input;
///
/// let input = parse_input("in{x<10:A,R}\n\n{x=3}\n{x=12}\n").unwrap();
/// assert_eq!(input.workflows.len(), 1);
/// assert_eq!(input.records.len(), 2);
/// ```
pub fn parse_input(text: &str) -> Result<RulesetInput, BuildError> {
    let mut workflows = Vec::new();
    let mut records = Vec::new();
    let mut in_record_block = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let lineno = idx + 1;
        if line.is_empty() {
            in_record_block = true;
            continue;
        }
        if in_record_block {
            records.push(parse_record(line, lineno)?);
        } else {
            workflows.push(parse_workflow(line, lineno)?);
        }
    }

    Ok(RulesetInput { workflows, records })
}

fn parse_workflow(line: &str, lineno: usize) -> Result<Workflow, BuildError> {
    let body = line
        .strip_suffix('}')
        .ok_or_else(|| workflow_err(lineno, "missing closing brace"))?;
    let (label, steps_text) = body
        .split_once('{')
        .ok_or_else(|| workflow_err(lineno, "missing opening brace"))?;
    if label.is_empty() {
        return Err(workflow_err(lineno, "empty label"));
    }

    let steps = steps_text
        .split(',')
        .map(|token| parse_step(token, lineno))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Workflow::new(label, steps))
}

fn parse_step(token: &str, lineno: usize) -> Result<Step, BuildError> {
    let Some((predicate, target)) = token.split_once(':') else {
        // no colon: an unconditional fallthrough to a bare target
        if token.contains('<') || token.contains('>') {
            return Err(workflow_err(lineno, format!("step '{token}' lacks a target")));
        }
        return Ok(Step::Fallthrough {
            target: parse_target(token, lineno)?,
        });
    };

    let (op, (field, threshold_text)) = if let Some(parts) = predicate.split_once('<') {
        (Op::LessThan, parts)
    } else if let Some(parts) = predicate.split_once('>') {
        (Op::GreaterThan, parts)
    } else {
        return Err(workflow_err(
            lineno,
            format!("step '{token}' has a target but no comparison"),
        ));
    };

    if field.is_empty() {
        return Err(workflow_err(lineno, format!("step '{token}' has an empty field")));
    }
    let threshold = threshold_text
        .parse()
        .map_err(|_| workflow_err(lineno, format!("invalid threshold '{threshold_text}'")))?;

    Ok(Step::Conditional {
        condition: Condition {
            field: field.to_string(),
            op,
            threshold,
        },
        target: parse_target(target, lineno)?,
    })
}

fn parse_target(label: &str, lineno: usize) -> Result<Target, BuildError> {
    match label {
        "" => Err(workflow_err(lineno, "empty target label")),
        "A" => Ok(Target::Terminal(Verdict::Accept)),
        "R" => Ok(Target::Terminal(Verdict::Reject)),
        name => Ok(Target::Workflow(name.to_string())),
    }
}

fn parse_record(line: &str, lineno: usize) -> Result<Record, BuildError> {
    let body = line
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| record_err(lineno, "missing braces"))?;

    let mut values = BTreeMap::new();
    for pair in body.split(',') {
        let (field, value_text) = pair
            .split_once('=')
            .ok_or_else(|| record_err(lineno, format!("'{pair}' is not field=value")))?;
        if field.is_empty() {
            return Err(record_err(lineno, format!("'{pair}' has an empty field")));
        }
        let value = value_text
            .parse()
            .map_err(|_| record_err(lineno, format!("invalid value '{value_text}'")))?;
        if values.insert(field.to_string(), value).is_some() {
            return Err(record_err(lineno, format!("duplicate field '{field}'")));
        }
    }

    Ok(Record::new(values))
}

fn workflow_err(line: usize, reason: impl Into<String>) -> BuildError {
    BuildError::MalformedWorkflow {
        line,
        reason: reason.into(),
    }
}

fn record_err(line: usize, reason: impl Into<String>) -> BuildError {
    BuildError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}
