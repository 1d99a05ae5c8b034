//! Inclusive integer intervals.

use std::fmt;

/// An inclusive integer interval `[min, max]`.
///
/// A range with `min > max` is *empty*: it has zero members and must never
/// be routed further by the engine. Splitting may legitimately produce empty
/// ranges; callers check [`Range::is_empty`] before recursing.
///
/// # Examples
///
/// ```
/// use rulesieve::domain::Range;
///
/// let r = Range::new(1, 4000);
/// assert_eq!(r.len(), 4000);
///
/// let (matched, rest) = r.split_less_than(1351);
/// assert_eq!(matched, Range::new(1, 1350));
/// assert_eq!(rest, Range::new(1351, 4000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive).
    pub max: i64,
}

impl Range {
    /// Creates a new range. `min > max` yields an empty range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether this range contains no values.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Number of integers in the range (0 when empty).
    pub fn len(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.max - self.min + 1
        }
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// The middle value of the range. Meaningless for empty ranges.
    pub fn midpoint(&self) -> i64 {
        self.min + (self.max - self.min) / 2
    }

    /// Splits at `value < threshold`: `(matched, rest)`.
    ///
    /// `matched` holds every member strictly below the threshold, `rest` the
    /// complement. Either side may come back empty.
    pub fn split_less_than(&self, threshold: i64) -> (Range, Range) {
        let matched = Range::new(self.min, self.max.min(threshold - 1));
        let rest = Range::new(self.min.max(threshold), self.max);
        (matched, rest)
    }

    /// Splits at `value > threshold`: `(matched, rest)`.
    pub fn split_greater_than(&self, threshold: i64) -> (Range, Range) {
        let matched = Range::new(self.min.max(threshold + 1), self.max);
        let rest = Range::new(self.min, self.max.min(threshold));
        (matched, rest)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_empty() {
        assert_eq!(Range::new(1, 10).len(), 10);
        assert_eq!(Range::new(5, 5).len(), 1);

        let empty = Range::new(6, 5);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_contains() {
        let r = Range::new(10, 20);
        assert!(r.contains(10));
        assert!(r.contains(20));
        assert!(!r.contains(9));
        assert!(!r.contains(21));
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(Range::new(1, 10).midpoint(), 5);
        assert_eq!(Range::new(7, 7).midpoint(), 7);
    }

    #[test]
    fn test_split_less_than_interior() {
        let (matched, rest) = Range::new(1, 10).split_less_than(4);
        assert_eq!(matched, Range::new(1, 3));
        assert_eq!(rest, Range::new(4, 10));
        assert_eq!(matched.len() + rest.len(), 10);
    }

    #[test]
    fn test_split_less_than_below_range() {
        // threshold at the very bottom: nothing matches
        let (matched, rest) = Range::new(1, 10).split_less_than(1);
        assert!(matched.is_empty());
        assert_eq!(rest, Range::new(1, 10));
    }

    #[test]
    fn test_split_less_than_above_range() {
        // threshold past the top: everything matches
        let (matched, rest) = Range::new(1, 10).split_less_than(11);
        assert_eq!(matched, Range::new(1, 10));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_split_greater_than_interior() {
        let (matched, rest) = Range::new(1, 10).split_greater_than(7);
        assert_eq!(matched, Range::new(8, 10));
        assert_eq!(rest, Range::new(1, 7));
        assert_eq!(matched.len() + rest.len(), 10);
    }

    #[test]
    fn test_split_greater_than_at_top() {
        let (matched, rest) = Range::new(1, 10).split_greater_than(10);
        assert!(matched.is_empty());
        assert_eq!(rest, Range::new(1, 10));
    }

    #[test]
    fn test_split_greater_than_below_range() {
        let (matched, rest) = Range::new(5, 10).split_greater_than(2);
        assert_eq!(matched, Range::new(5, 10));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_split_preserves_length() {
        let r = Range::new(100, 250);
        for threshold in [50, 100, 101, 175, 250, 251, 400] {
            let (m, rest) = r.split_less_than(threshold);
            assert_eq!(m.len() + rest.len(), r.len(), "lt {threshold}");
            let (m, rest) = r.split_greater_than(threshold);
            assert_eq!(m.len() + rest.len(), r.len(), "gt {threshold}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(1, 4000).to_string(), "[1,4000]");
    }
}
