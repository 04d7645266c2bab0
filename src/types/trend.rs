//! Attendance trend types
//!
//! Typed contract for the analytics collaborator behind the instructor
//! dashboard: an inclusive date range in, an ordered sequence of
//! `(date, rate)` points out.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TrendRange {
    /// Build a range, swapping the bounds if they were given backwards
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            TrendRange { from, to }
        } else {
            TrendRange { from: to, to: from }
        }
    }

    /// The `days` most recent days ending at `today` (inclusive)
    ///
    /// `days == 0` is treated as a single day. Spans reaching past the
    /// earliest representable date start at [`NaiveDate::MIN`].
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        let from = today
            .checked_sub_signed(Duration::days(span))
            .unwrap_or(NaiveDate::MIN);
        TrendRange { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days covered
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Attendance rate (percent, 0-100) for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub rate: Decimal,
}

impl TrendPoint {
    pub fn new(date: NaiveDate, rate: Decimal) -> Self {
        TrendPoint { date, rate }
    }

    /// Chart axis label, `MM/DD`
    pub fn label(&self) -> String {
        self.date.format("%m/%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::week(7, date(2024, 3, 1), 7)]
    #[case::single(1, date(2024, 3, 7), 1)]
    #[case::zero_is_one_day(0, date(2024, 3, 7), 1)]
    fn test_last_days(#[case] days: u32, #[case] expected_from: NaiveDate, #[case] len: i64) {
        let range = TrendRange::last_days(date(2024, 3, 7), days);
        assert_eq!(range.from, expected_from);
        assert_eq!(range.to, date(2024, 3, 7));
        assert_eq!(range.len_days(), len);
    }

    #[test]
    fn test_last_days_saturates_at_min_date() {
        let range = TrendRange::last_days(date(2024, 5, 7), u32::MAX);
        assert_eq!(range.from, NaiveDate::MIN);
        assert_eq!(range.to, date(2024, 5, 7));
        assert!(range.contains(date(1900, 1, 1)));
    }

    #[test]
    fn test_new_swaps_reversed_bounds() {
        let range = TrendRange::new(date(2024, 3, 7), date(2024, 3, 1));
        assert_eq!(range.from, date(2024, 3, 1));
        assert!(range.contains(date(2024, 3, 4)));
        assert!(!range.contains(date(2024, 3, 8)));
    }

    #[test]
    fn test_label_is_zero_padded_month_day() {
        let point = TrendPoint::new(date(2024, 1, 5), Decimal::new(85, 0));
        assert_eq!(point.label(), "01/05");
    }
}
