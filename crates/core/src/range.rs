//! Bound pairs over scores and ranks.
//!
//! A [`Range`] is what callers hand to range commands. The adapters never
//! compute ranges locally; they only translate them into the argument shape
//! Redis expects:
//!
//! - score ranges become `min`/`max` strings (`2`, `(2`, `-inf`, `+inf`);
//! - rank ranges become inclusive `start`/`stop` indices.

use std::ops;

/// One side of a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound<T> {
    Inclusive(T),
    Exclusive(T),
    Unbounded,
}

impl<T> Bound<T> {
    /// Returns the bound value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Bound::Inclusive(value) | Bound::Exclusive(value) => Some(value),
            Bound::Unbounded => None,
        }
    }

    pub fn is_inclusive(&self) -> bool {
        matches!(self, Bound::Inclusive(_))
    }
}

/// An inclusive or exclusive bound pair, either side possibly unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub lower: Bound<T>,
    pub upper: Bound<T>,
}

impl<T> Range<T> {
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Self { lower, upper }
    }

    /// `[lower, upper]`
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(Bound::Inclusive(lower), Bound::Inclusive(upper))
    }

    /// `(lower, upper)`
    pub fn open(lower: T, upper: T) -> Self {
        Self::new(Bound::Exclusive(lower), Bound::Exclusive(upper))
    }

    /// `[lower, ∞)`
    pub fn at_least(lower: T) -> Self {
        Self::new(Bound::Inclusive(lower), Bound::Unbounded)
    }

    /// `(lower, ∞)`
    pub fn greater_than(lower: T) -> Self {
        Self::new(Bound::Exclusive(lower), Bound::Unbounded)
    }

    /// `(-∞, upper]`
    pub fn at_most(upper: T) -> Self {
        Self::new(Bound::Unbounded, Bound::Inclusive(upper))
    }

    /// `(-∞, upper)`
    pub fn less_than(upper: T) -> Self {
        Self::new(Bound::Unbounded, Bound::Exclusive(upper))
    }

    pub fn unbounded() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }
}

impl<T> From<ops::RangeInclusive<T>> for Range<T> {
    fn from(range: ops::RangeInclusive<T>) -> Self {
        let (lower, upper) = range.into_inner();
        Self::closed(lower, upper)
    }
}

impl<T> From<ops::Range<T>> for Range<T> {
    fn from(range: ops::Range<T>) -> Self {
        Self::new(Bound::Inclusive(range.start), Bound::Exclusive(range.end))
    }
}

impl<T> From<ops::RangeFrom<T>> for Range<T> {
    fn from(range: ops::RangeFrom<T>) -> Self {
        Self::at_least(range.start)
    }
}

impl<T> From<ops::RangeToInclusive<T>> for Range<T> {
    fn from(range: ops::RangeToInclusive<T>) -> Self {
        Self::at_most(range.end)
    }
}

impl<T> From<ops::RangeFull> for Range<T> {
    fn from(_: ops::RangeFull) -> Self {
        Self::unbounded()
    }
}

// ============================================================================
// Score ranges
// ============================================================================

impl Range<f64> {
    /// Orders the bounds so the lower bound holds the smaller score.
    ///
    /// Score ranges describe a set of scores, so `[3, 2]` and `[2, 3]` select
    /// the same members. Reverse queries rely on this: Redis expects `max`
    /// before `min` there, and the adapter derives both from the normalized
    /// range regardless of how the caller wrote it.
    pub fn normalized(self) -> Self {
        match (self.lower.value(), self.upper.value()) {
            (Some(lower), Some(upper)) if lower > upper => Self {
                lower: self.upper,
                upper: self.lower,
            },
            _ => self,
        }
    }

    /// Returns true when either bound is NaN.
    pub fn has_nan(&self) -> bool {
        [self.lower.value(), self.upper.value()]
            .into_iter()
            .flatten()
            .any(|value| value.is_nan())
    }

    /// Redis `min` and `max` arguments for this range, after normalization.
    pub fn to_score_args(&self) -> (String, String) {
        let range = self.normalized();
        (
            score_arg(&range.lower, "-inf"),
            score_arg(&range.upper, "+inf"),
        )
    }
}

/// Formats one score bound; infinite and missing values use the sentinel.
fn score_arg(bound: &Bound<f64>, unbounded: &str) -> String {
    match bound {
        Bound::Unbounded => unbounded.to_string(),
        Bound::Inclusive(value) | Bound::Exclusive(value) if value.is_infinite() => {
            infinity_arg(*value).to_string()
        }
        Bound::Inclusive(value) => format_score(*value),
        Bound::Exclusive(value) => format!("({}", format_score(*value)),
    }
}

fn infinity_arg(value: f64) -> &'static str {
    if value.is_sign_negative() {
        "-inf"
    } else {
        "+inf"
    }
}

/// Formats a score the way Redis accepts it as an argument.
///
/// Uses the shortest representation that parses back to the same value, so
/// `2.0` is sent as `2` and `3.5` as `3.5`.
pub fn format_score(score: f64) -> String {
    if score.is_infinite() {
        return infinity_arg(score).to_string();
    }
    format!("{}", score)
}

// ============================================================================
// Rank ranges
// ============================================================================

/// A `start`/`stop` pair Redis resolves to no elements for any set size.
pub const EMPTY_RANK_WINDOW: (i64, i64) = (1, 0);

impl Range<i64> {
    /// Inclusive `start`/`stop` indices for this rank range.
    ///
    /// An unbounded lower side starts at `0`, an unbounded upper side stops at
    /// `-1` (the last element). Exclusive bounds shift one index inwards.
    ///
    /// Shifting `< 0` or `> -1` inwards would cross from one end of the set to
    /// the other (`-1` is the last element, `0` the first), so those ranges
    /// select nothing and map to [`EMPTY_RANK_WINDOW`].
    pub fn to_rank_indices(&self) -> (i64, i64) {
        let start = match self.lower {
            Bound::Inclusive(index) => index,
            Bound::Exclusive(-1) => return EMPTY_RANK_WINDOW,
            Bound::Exclusive(index) => index.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match self.upper {
            Bound::Inclusive(index) => index,
            Bound::Exclusive(0) => return EMPTY_RANK_WINDOW,
            Bound::Exclusive(index) => index.saturating_sub(1),
            Bound::Unbounded => -1,
        };
        (start, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_score_args() {
        assert_eq!(
            Range::<f64>::closed(2.0, 3.0).to_score_args(),
            ("2".to_string(), "3".to_string())
        );
    }

    #[test]
    fn test_fractional_score_args() {
        assert_eq!(
            Range::<f64>::closed(1.5, 3.25).to_score_args(),
            ("1.5".to_string(), "3.25".to_string())
        );
    }

    #[test]
    fn test_exclusive_score_args() {
        assert_eq!(
            Range::<f64>::open(2.0, 3.0).to_score_args(),
            ("(2".to_string(), "(3".to_string())
        );
    }

    #[test]
    fn test_infinity_maps_to_sentinels() {
        let range = Range::<f64>::closed(f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(
            range.to_score_args(),
            ("-inf".to_string(), "+inf".to_string())
        );
    }

    #[test]
    fn test_exclusive_infinity_has_no_paren() {
        let range = Range::<f64>::open(f64::NEG_INFINITY, 2.0);
        assert_eq!(
            range.to_score_args(),
            ("-inf".to_string(), "(2".to_string())
        );
    }

    #[test]
    fn test_unbounded_score_args() {
        assert_eq!(
            Range::<f64>::unbounded().to_score_args(),
            ("-inf".to_string(), "+inf".to_string())
        );
        assert_eq!(
            Range::<f64>::at_least(2.0).to_score_args(),
            ("2".to_string(), "+inf".to_string())
        );
        assert_eq!(
            Range::<f64>::less_than(2.0).to_score_args(),
            ("-inf".to_string(), "(2".to_string())
        );
    }

    #[test]
    fn test_normalized_swaps_descending_bounds() {
        let range = Range::<f64>::new(Bound::Inclusive(3.0), Bound::Exclusive(2.0)).normalized();
        assert_eq!(range.lower, Bound::Exclusive(2.0));
        assert_eq!(range.upper, Bound::Inclusive(3.0));
    }

    #[test]
    fn test_normalized_keeps_ascending_bounds() {
        let range = Range::<f64>::closed(2.0, 3.0);
        assert_eq!(range.normalized(), range);
    }

    #[test]
    fn test_normalized_keeps_half_open() {
        let range = Range::<f64>::at_least(5.0);
        assert_eq!(range.normalized(), range);
    }

    #[test]
    fn test_descending_score_args() {
        assert_eq!(
            Range::<f64>::closed(3.0, 2.0).to_score_args(),
            ("2".to_string(), "3".to_string())
        );
    }

    #[test]
    fn test_has_nan() {
        assert!(Range::<f64>::closed(f64::NAN, 1.0).has_nan());
        assert!(Range::<f64>::at_most(f64::NAN).has_nan());
        assert!(!Range::<f64>::closed(0.0, 1.0).has_nan());
        assert!(!Range::<f64>::unbounded().has_nan());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(2.0), "2");
        assert_eq!(format_score(-0.5), "-0.5");
        assert_eq!(format_score(f64::INFINITY), "+inf");
        assert_eq!(format_score(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_closed_rank_indices() {
        assert_eq!(Range::<i64>::closed(1, 2).to_rank_indices(), (1, 2));
    }

    #[test]
    fn test_exclusive_rank_indices() {
        assert_eq!(Range::<i64>::open(0, 3).to_rank_indices(), (1, 2));
        assert_eq!(Range::<i64>::from(0..3).to_rank_indices(), (0, 2));
    }

    #[test]
    fn test_exclusive_rank_bounds_at_the_ends_select_nothing() {
        assert_eq!(Range::<i64>::from(0..0).to_rank_indices(), EMPTY_RANK_WINDOW);
        assert_eq!(Range::<i64>::less_than(0).to_rank_indices(), EMPTY_RANK_WINDOW);
        assert_eq!(Range::<i64>::greater_than(-1).to_rank_indices(), EMPTY_RANK_WINDOW);
        assert_eq!(Range::<i64>::open(-1, 2).to_rank_indices(), EMPTY_RANK_WINDOW);
        let (start, stop) = EMPTY_RANK_WINDOW;
        assert!(start > stop && start >= 0);
    }

    #[test]
    fn test_exclusive_rank_bounds_away_from_the_ends() {
        assert_eq!(Range::<i64>::less_than(1).to_rank_indices(), (0, 0));
        assert_eq!(Range::<i64>::less_than(-1).to_rank_indices(), (0, -2));
        assert_eq!(Range::<i64>::greater_than(-2).to_rank_indices(), (-1, -1));
    }

    #[test]
    fn test_unbounded_rank_indices() {
        assert_eq!(Range::<i64>::unbounded().to_rank_indices(), (0, -1));
        assert_eq!(Range::<i64>::from(2..).to_rank_indices(), (2, -1));
        assert_eq!(Range::<i64>::from(..=4).to_rank_indices(), (0, 4));
    }

    #[test]
    fn test_negative_rank_indices_are_not_reordered() {
        assert_eq!(Range::<i64>::closed(-2, -1).to_rank_indices(), (-2, -1));
        assert_eq!(Range::<i64>::closed(0, -1).to_rank_indices(), (0, -1));
    }

    #[test]
    fn test_from_std_ranges() {
        assert_eq!(Range::<i64>::from(1..=2), Range::<i64>::closed(1, 2));
        assert_eq!(
            Range::<f64>::from(1.0..2.0),
            Range::<f64>::new(Bound::Inclusive(1.0), Bound::Exclusive(2.0))
        );
        assert_eq!(Range::<i64>::from(..), Range::<i64>::unbounded());
    }

    #[test]
    fn test_bound_accessors() {
        assert_eq!(Bound::Inclusive(1).value(), Some(&1));
        assert_eq!(Bound::<i32>::Unbounded.value(), None);
        assert!(Bound::Inclusive(1).is_inclusive());
        assert!(!Bound::Exclusive(1).is_inclusive());
    }
}
