//! Workflow rule engine with a dual-mode evaluator.
//!
//! Classifies structured records against a directed graph of conditional
//! rule workflows, and reasons about the same rules *symbolically* to count
//! how many records in an astronomically large input domain (on the order of
//! 4000^4) the rules accept — without enumerating records one by one.
//!
//! - **Concrete routing**: [`engine::RuleEngine::evaluate`] threads one
//!   record through the workflow graph to an Accept/Reject verdict.
//! - **Symbolic range propagation**: [`engine::RuleEngine::analyze`] threads
//!   one hyper-rectangle (initially the full domain) through the same graph,
//!   splitting it at every conditional step into a provably disjoint,
//!   complete partition of `(rectangle, verdict)` pairs. Summing the Accept
//!   volumes counts the accepted records.
//!
//! # Architecture
//!
//! - [`domain`] — inclusive integer ranges and hyper-rectangles, with the
//!   splitting arithmetic.
//! - [`engine`] — the rule-graph data model, build-time validation, and both
//!   evaluators.
//! - [`parse`] — the two-block ruleset text format.
//! - [`error`] — the build-time error taxonomy; after a successful build
//!   there is no runtime failure mode.
//!
//! Fields are totally ordered integers, rules evaluate strictly in
//! declaration order, and only single-field less-than/greater-than predicates
//! exist. This is not a general constraint solver.
//!
//! # Features
//!
//! - `serde`: Serialize/Deserialize derives on all public data types.
//! - `parallel`: `analyze_parallel`, forking the two independent halves of
//!   every split onto rayon.

pub mod domain;
pub mod engine;
pub mod error;
pub mod parse;
