//! Workflow rule engine.
//!
//! Classifies records against a directed, acyclic graph of conditional rule
//! workflows. The engine is dual-mode:
//!
//! - **[`RuleEngine::evaluate`]**: threads one concrete [`Record`] through
//!   the graph to a terminal [`Verdict`].
//! - **[`RuleEngine::analyze`]**: threads one
//!   [`HyperRect`](crate::domain::HyperRect) through the same graph,
//!   splitting it at every conditional step into a complete, disjoint
//!   partition of `(rectangle, verdict)` pairs — counting how many of an
//!   astronomically large domain's records the rules accept without
//!   enumerating any of them.
//!
//! # Key Components
//!
//! - **[`Record`]**, **[`Condition`]**, **[`Step`]**, **[`Workflow`]** — the
//!   rule-graph data model
//! - **[`Target`]** — the single dispatch point shared by both evaluators
//! - **[`RuleEngine`]** — eager validation at build time, then a read-only
//!   snapshot for its entire lifetime
//!
//! # Design
//!
//! Steps are a tagged union, not a trait hierarchy: both evaluators pattern
//! match on the variants, keeping the splitting and checking logic exhaustive
//! and centrally reviewable. Rules evaluate strictly in declaration order;
//! there is no reordering or optimization pass.

#[allow(clippy::module_inception)]
mod engine;
mod types;

pub use engine::{RuleEngine, DEFAULT_ENTRY};
pub use types::{Condition, Op, Record, Step, Target, Verdict, Workflow};
