//! Dashboard summary statistics
//!
//! Headline figures for the instructor and student dashboards. Both come
//! from the analytics collaborator; nothing here is computed from local
//! attendance records.

use rust_decimal::{Decimal, RoundingStrategy};

/// Summary cards on the instructor dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorStatistics {
    /// Students enrolled in the instructor's courses
    pub total_students: u32,

    pub total_courses: u32,

    /// Classes currently in session
    pub active_classes: u32,

    /// Overall attendance rate in percent (0-100)
    pub attendance_rate: Decimal,
}

/// A student's own attendance tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAttendance {
    pub present: u32,
    pub absent: u32,
    pub total: u32,
    /// Percent present (0-100), one decimal place
    pub rate: Decimal,
}

impl StudentAttendance {
    /// Build a tally from raw counts, deriving `total` and `rate`
    ///
    /// A student with no recorded sessions has a rate of zero.
    pub fn from_counts(present: u32, absent: u32) -> Self {
        let total = present.saturating_add(absent);
        let rate = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(present) * Decimal::ONE_HUNDRED / Decimal::from(total))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        StudentAttendance {
            present,
            absent,
            total,
            rate,
        }
    }

    /// `total` equals `present + absent` and `rate` matches the counts
    pub fn is_consistent(&self) -> bool {
        *self == Self::from_counts(self.present, self.absent)
    }
}
