//! # Pricing
//!
//! Booking price arithmetic: stay totals and long-stay discounts.
//!
//! Prices are plain currency amounts (rubles), matching how the hotel
//! quotes them; totals are always nightly price × whole nights, so no
//! rounding is involved.

use crate::daterange::DateRange;

/// Discount tiers by stay length, longest first: (minimum nights, rate).
const DISCOUNT_TIERS: [(i64, f64); 3] = [(30, 0.20), (14, 0.15), (7, 0.10)];

/// Total price for a stay: nightly price × number of nights.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use harmony_core::daterange::DateRange;
/// use harmony_core::pricing::booking_total;
///
/// let stay = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(booking_total(2000.0, &stay), 6000.0);
/// ```
#[inline]
pub fn booking_total(price_per_night: f64, stay: &DateRange) -> f64 {
    price_per_night * stay.nights() as f64
}

/// Long-stay discount for a booking total.
///
/// ## Tiers
/// - 30+ nights: 20%
/// - 14+ nights: 15%
/// - 7+ nights: 10%
///
/// ## Returns
/// `(discount amount, total after discount)`. Stays under a week get
/// `(0.0, total)`.
pub fn long_stay_discount(total: f64, nights: i64) -> (f64, f64) {
    let rate = DISCOUNT_TIERS
        .iter()
        .find(|(min_nights, _)| nights >= *min_nights)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0);

    let discount = total * rate;
    (discount, total - discount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stay(nights: u64) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        DateRange::new(start, start.checked_add_days(chrono::Days::new(nights)).unwrap()).unwrap()
    }

    #[test]
    fn test_booking_total() {
        assert_eq!(booking_total(2000.0, &stay(3)), 6000.0);
        assert_eq!(booking_total(1500.5, &stay(2)), 3001.0);
        assert_eq!(booking_total(2000.0, &stay(1)), 2000.0);
    }

    #[test]
    fn test_no_discount_under_a_week() {
        assert_eq!(long_stay_discount(12000.0, 6), (0.0, 12000.0));
    }

    #[test]
    fn test_discount_tiers() {
        // 7 nights: 10%
        let (discount, total) = long_stay_discount(14000.0, 7);
        assert_eq!(discount, 1400.0);
        assert_eq!(total, 12600.0);

        // 14 nights: 15%
        let (discount, total) = long_stay_discount(28000.0, 14);
        assert_eq!(discount, 4200.0);
        assert_eq!(total, 23800.0);

        // 30 nights: 20%
        let (discount, total) = long_stay_discount(60000.0, 30);
        assert_eq!(discount, 12000.0);
        assert_eq!(total, 48000.0);

        // Longest tier wins past 30
        let (discount, _) = long_stay_discount(100000.0, 90);
        assert_eq!(discount, 20000.0);
    }
}
