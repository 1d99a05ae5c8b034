//! Axis-aligned boxes over named integer fields.

use super::range::Range;
use std::collections::BTreeMap;

/// An axis-aligned box: one inclusive [`Range`] per declared field.
///
/// Represents a set of possible records. The box is empty (volume 0) as soon
/// as any single field range is empty.
///
/// Fields are stored in a `BTreeMap` so iteration order — and therefore the
/// order of everything derived from a rectangle — is deterministic.
///
/// # Examples
///
/// ```
/// use rulesieve::domain::{HyperRect, Range};
///
/// let domain = HyperRect::uniform(["x", "m", "a", "s"], Range::new(1, 4000));
/// assert_eq!(domain.volume(), 4000i64.pow(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperRect {
    ranges: BTreeMap<String, Range>,
}

impl HyperRect {
    /// Creates a rectangle from explicit per-field ranges.
    pub fn new(ranges: BTreeMap<String, Range>) -> Self {
        Self { ranges }
    }

    /// Creates a rectangle with the same range on every field.
    pub fn uniform<I, S>(fields: I, range: Range) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ranges: fields.into_iter().map(|f| (f.into(), range)).collect(),
        }
    }

    /// The range of a single field, if declared.
    pub fn get(&self, field: &str) -> Option<Range> {
        self.ranges.get(field).copied()
    }

    /// A copy of this rectangle with one field's range replaced.
    ///
    /// # Panics
    /// Panics if `field` is not declared on this rectangle; a condition on an
    /// undeclared field is a configuration defect, not a recoverable state.
    pub fn with_range(&self, field: &str, range: Range) -> Self {
        let mut ranges = self.ranges.clone();
        let slot = ranges
            .get_mut(field)
            .unwrap_or_else(|| panic!("field '{field}' not declared on rectangle"));
        *slot = range;
        Self { ranges }
    }

    /// Whether any field range is empty (and the box holds no records).
    pub fn is_empty(&self) -> bool {
        self.ranges.values().any(Range::is_empty)
    }

    /// Number of integer tuples inside the box; 0 if any field is empty.
    pub fn volume(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.ranges.values().map(Range::len).product()
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.ranges.len()
    }

    /// Iterates over `(field, range)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Range)> {
        self.ranges.iter().map(|(name, range)| (name.as_str(), *range))
    }

    /// Whether two rectangles share no record.
    ///
    /// True when the per-field intersection is empty in at least one field.
    pub fn is_disjoint(&self, other: &HyperRect) -> bool {
        self.iter().any(|(field, range)| match other.get(field) {
            Some(o) => range.min.max(o.min) > range.max.min(o.max),
            None => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(entries: &[(&str, i64, i64)]) -> HyperRect {
        HyperRect::new(
            entries
                .iter()
                .map(|&(name, min, max)| (name.to_string(), Range::new(min, max)))
                .collect(),
        )
    }

    #[test]
    fn test_uniform_volume() {
        let domain = HyperRect::uniform(["x", "m", "a", "s"], Range::new(1, 4000));
        assert_eq!(domain.field_count(), 4);
        assert_eq!(domain.volume(), 256_000_000_000_000);
    }

    #[test]
    fn test_volume_zero_when_any_field_empty() {
        let r = rect(&[("a", 1, 10), ("b", 5, 4)]);
        assert!(r.is_empty());
        assert_eq!(r.volume(), 0);
    }

    #[test]
    fn test_with_range_replaces_single_field() {
        let r = rect(&[("a", 1, 10), ("b", 1, 10)]);
        let narrowed = r.with_range("a", Range::new(3, 5));
        assert_eq!(narrowed.get("a"), Some(Range::new(3, 5)));
        assert_eq!(narrowed.get("b"), Some(Range::new(1, 10)));
        // original untouched
        assert_eq!(r.get("a"), Some(Range::new(1, 10)));
    }

    #[test]
    #[should_panic(expected = "not declared")]
    fn test_with_range_unknown_field_panics() {
        rect(&[("a", 1, 10)]).with_range("z", Range::new(1, 1));
    }

    #[test]
    fn test_disjoint_on_one_field() {
        let r1 = rect(&[("a", 1, 5), ("b", 1, 10)]);
        let r2 = rect(&[("a", 6, 10), ("b", 1, 10)]);
        assert!(r1.is_disjoint(&r2));
        assert!(r2.is_disjoint(&r1));
    }

    #[test]
    fn test_overlapping_not_disjoint() {
        let r1 = rect(&[("a", 1, 5), ("b", 1, 10)]);
        let r2 = rect(&[("a", 5, 10), ("b", 10, 20)]);
        assert!(!r1.is_disjoint(&r2)); // shares (a=5, b=10)
    }

    #[test]
    fn test_iter_is_field_ordered() {
        let r = rect(&[("s", 1, 1), ("a", 2, 2), ("m", 3, 3)]);
        let fields: Vec<&str> = r.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["a", "m", "s"]);
    }
}
