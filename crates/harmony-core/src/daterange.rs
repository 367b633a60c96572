//! # Date Range
//!
//! Half-open calendar date intervals for booking arithmetic.
//!
//! ## Half-Open Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Why [check-in, check-out) ?                            │
//! │                                                                         │
//! │  Booking A:  Jan 10 ────────■ Jan 12     [10, 12) = nights 10, 11      │
//! │  Booking B:          Jan 12 ■──────── Jan 15     [12, 15)              │
//! │                                                                         │
//! │  Guest A leaves on the morning of the 12th, guest B arrives that       │
//! │  afternoon. Sharing only the boundary date is NOT an overlap,          │
//! │  so back-to-back bookings of the same room are legal.                  │
//! │                                                                         │
//! │  Booking C:      Jan 11 ■────■ Jan 13    [11, 13) overlaps [10, 12)    │
//! │                                          (they share night 11)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! nights = check-out − check-in, and `new()` rejects empty or reversed
//! intervals, so every `DateRange` holds at least one night.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A half-open interval of calendar dates: `[start, end)`.
///
/// `end > start` is enforced at construction, so a `DateRange` always
/// covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a date range, rejecting `end <= start`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use harmony_core::daterange::DateRange;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    ///
    /// assert!(DateRange::new(start, end).is_ok());
    /// assert!(DateRange::new(end, start).is_err());
    /// assert!(DateRange::new(start, start).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// First date covered by the range (check-in day).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive end of the range (check-out day, NOT covered).
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether two ranges share at least one night.
    ///
    /// Ranges that only touch at a boundary do NOT overlap: a check-out
    /// and a check-in may fall on the same day.
    #[inline]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    /// Whether `date` falls inside the range: `start <= date < end`.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Length of the range in whole days. Always >= 1.
    #[inline]
    pub fn duration(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of nights a guest stays. Alias of [`duration`](Self::duration),
    /// named for the hotel domain.
    #[inline]
    pub fn nights(&self) -> i64 {
        self.duration()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(d(start.0, start.1, start.2), d(end.0, end.1, end.2)).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_reversed_ranges() {
        assert!(DateRange::new(d(2024, 1, 10), d(2024, 1, 10)).is_err());
        assert!(DateRange::new(d(2024, 1, 12), d(2024, 1, 10)).is_err());
    }

    #[test]
    fn test_shared_boundary_does_not_overlap() {
        // Guest A checks out Jan 12, guest B checks in Jan 12: legal
        let a = range((2024, 1, 10), (2024, 1, 12));
        let b = range((2024, 1, 12), (2024, 1, 15));

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_shared_night_overlaps() {
        let a = range((2024, 1, 10), (2024, 1, 12));
        let c = range((2024, 1, 11), (2024, 1, 13));

        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = range((2024, 1, 1), (2024, 1, 31));
        let inner = range((2024, 1, 10), (2024, 1, 12));

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_identical_ranges_overlap() {
        let a = range((2024, 3, 1), (2024, 3, 4));
        let b = range((2024, 3, 1), (2024, 3, 4));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let a = range((2024, 1, 1), (2024, 1, 5));
        let b = range((2024, 2, 1), (2024, 2, 5));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = range((2024, 1, 10), (2024, 1, 12));

        assert!(r.contains(d(2024, 1, 10))); // check-in night
        assert!(r.contains(d(2024, 1, 11))); // middle night
        assert!(!r.contains(d(2024, 1, 12))); // check-out day is excluded
        assert!(!r.contains(d(2024, 1, 9)));
    }

    #[test]
    fn test_duration_and_nights() {
        let r = range((2024, 3, 1), (2024, 3, 4));
        assert_eq!(r.duration(), 3);
        assert_eq!(r.nights(), 3);

        let one_night = range((2024, 3, 1), (2024, 3, 2));
        assert_eq!(one_night.nights(), 1);
    }

    #[test]
    fn test_display() {
        let r = range((2024, 3, 1), (2024, 3, 4));
        assert_eq!(r.to_string(), "2024-03-01 - 2024-03-04");
    }
}
