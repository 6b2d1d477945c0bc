//! Time-of-day comparison helpers.
//!
//! Pure functions with no I/O: a signed minute delta between two times of
//! day, and the rounding rule that turns late minutes into fractional hours.

use chrono::NaiveTime;
use rust_decimal::Decimal;

/// Returns the signed number of whole minutes from `from` to `to`.
///
/// Positive when `to` is later in the day than `from`, negative when it is
/// earlier.
///
/// # Examples
///
/// ```
/// use attendance_engine::detection::minutes_between;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let clock_in = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
/// assert_eq!(minutes_between(start, clock_in), 30);
/// assert_eq!(minutes_between(clock_in, start), -30);
/// ```
pub fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    (to - from).num_minutes()
}

/// Converts a minute count to hours, rounded to `precision` decimal places.
///
/// # Examples
///
/// ```
/// use attendance_engine::detection::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(30, 2), Decimal::new(50, 2)); // 0.50
/// assert_eq!(minutes_to_hours(6, 2), Decimal::new(10, 2)); // 0.10
/// ```
pub fn minutes_to_hours(minutes: i64, precision: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_same_instant_is_zero() {
        assert_eq!(minutes_between(time(9, 0), time(9, 0)), 0);
    }

    #[test]
    fn test_later_is_positive() {
        assert_eq!(minutes_between(time(9, 0), time(9, 6)), 6);
        assert_eq!(minutes_between(time(14, 0), time(22, 0)), 480);
    }

    #[test]
    fn test_earlier_is_negative() {
        assert_eq!(minutes_between(time(17, 0), time(16, 45)), -15);
    }

    #[test]
    fn test_seconds_truncate_toward_zero() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let almost_six = NaiveTime::from_hms_opt(9, 5, 59).unwrap();
        assert_eq!(minutes_between(start, almost_six), 5);
    }

    #[test]
    fn test_six_minutes_rounds_to_a_tenth() {
        assert_eq!(minutes_to_hours(6, 2), Decimal::new(10, 2));
    }

    #[test]
    fn test_thirty_minutes_is_half_an_hour() {
        assert_eq!(minutes_to_hours(30, 2), Decimal::new(50, 2));
    }

    #[test]
    fn test_rounding_precision_is_respected() {
        // 7 minutes = 0.11666..; two places rounds to 0.12, one place to 0.1.
        assert_eq!(minutes_to_hours(7, 2), Decimal::new(12, 2));
        assert_eq!(minutes_to_hours(7, 1), Decimal::new(1, 1));
    }

    proptest! {
        #[test]
        fn prop_delta_is_antisymmetric(h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60) {
            let a = time(h1, m1);
            let b = time(h2, m2);
            prop_assert_eq!(minutes_between(a, b), -minutes_between(b, a));
        }

        #[test]
        fn prop_delta_matches_minute_arithmetic(h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60) {
            let a = time(h1, m1);
            let b = time(h2, m2);
            let expected = (h2 as i64 * 60 + m2 as i64) - (h1 as i64 * 60 + m1 as i64);
            prop_assert_eq!(minutes_between(a, b), expected);
        }
    }
}
