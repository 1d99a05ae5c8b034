//! Build-time error taxonomy.
//!
//! Every failure mode of this crate is a construction failure: once an
//! engine validates, evaluation and analysis are total. Build errors are
//! terminal — everything here is pure and deterministic, so retrying would
//! reproduce the identical error.

use thiserror::Error;

/// Why a ruleset could not be parsed or assembled into an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A workflow line could not be parsed. Raised by
    /// [`parse_input`](crate::parse::parse_input); no partial result is
    /// returned.
    #[error("line {line}: malformed workflow: {reason}")]
    MalformedWorkflow { line: usize, reason: String },

    /// A record line could not be parsed.
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A step references a label that is neither a terminal nor a known
    /// workflow. Caught eagerly by [`RuleEngine::build`](crate::engine::RuleEngine::build),
    /// before any evaluation can reach it.
    #[error("workflow '{workflow}' references unknown target '{target}'")]
    UnknownTarget { workflow: String, target: String },

    /// `A` and `R` are terminal verdicts and may never name a workflow.
    #[error("label '{0}' is reserved for terminal verdicts")]
    ReservedLabel(String),

    /// Two workflows share a label.
    #[error("duplicate workflow label '{0}'")]
    DuplicateWorkflow(String),

    /// A workflow does not end with exactly one fallthrough step.
    #[error("workflow '{0}' must end with exactly one fallthrough step")]
    MisplacedFallthrough(String),

    /// The entry label names no workflow.
    #[error("entry workflow '{0}' is not defined")]
    MissingEntry(String),

    /// The rule graph loops; evaluation would never terminate.
    #[error("rule graph contains a cycle through workflow '{0}'")]
    CyclicRules(String),
}
