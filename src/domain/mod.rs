//! Integer domain geometry.
//!
//! Provides the two set representations the engine partitions over:
//!
//! - **[`Range`]**: an inclusive integer interval `[min, max]`. A range with
//!   `min > max` is empty and contributes zero members.
//! - **[`HyperRect`]**: an axis-aligned box with one range per named field,
//!   representing a set of possible records. Its volume is the number of
//!   integer tuples inside it.
//!
//! # Design
//!
//! This module contains NO rule concepts. Conditions, workflows, and verdicts
//! live in [`crate::engine`]; this layer only knows how to measure and split
//! boxes, which keeps the interval arithmetic centrally reviewable.

mod range;
mod rect;

pub use range::Range;
pub use rect::HyperRect;
