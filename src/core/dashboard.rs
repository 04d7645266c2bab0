//! Instructor and student dashboards
//!
//! Pulls daily rates and summary figures from an [`AttendanceAnalytics`]
//! collaborator and shapes them for display:
//! - [`Dashboard`] - the attendance trend chart
//! - [`InstructorOverview`] - summary cards plus the trend
//! - [`StudentOverview`] - the logged-in student's own tally

use crate::api::AttendanceAnalytics;
use crate::core::session::{Role, Session};
use crate::types::{ClientError, InstructorStatistics, StudentAttendance, TrendPoint, TrendRange};
use rust_decimal::{Decimal, RoundingStrategy};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    range: TrendRange,
    points: Vec<TrendPoint>,
}

impl Dashboard {
    /// Fetch the trend for `range`
    ///
    /// Points outside the range are dropped and the rest are sorted by date,
    /// so a sloppy collaborator cannot scramble the chart.
    pub async fn load(
        analytics: &dyn AttendanceAnalytics,
        range: TrendRange,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        let points = analytics.fetch_attendance_trend(range, cancel).await?;
        Ok(Self::from_points(range, points))
    }

    pub fn from_points(range: TrendRange, points: Vec<TrendPoint>) -> Self {
        let total = points.len();
        let mut points: Vec<TrendPoint> = points
            .into_iter()
            .filter(|point| range.contains(point.date))
            .collect();
        if points.len() != total {
            warn!(
                dropped = total - points.len(),
                "Trend points outside requested range"
            );
        }
        points.sort_by_key(|point| point.date);

        Dashboard { range, points }
    }

    pub fn range(&self) -> TrendRange {
        self.range
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// `MM/DD` axis labels, in date order
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(TrendPoint::label).collect()
    }

    pub fn rates(&self) -> Vec<Decimal> {
        self.points.iter().map(|point| point.rate).collect()
    }

    /// Mean rate rounded to one decimal place, `None` without data
    pub fn average_rate(&self) -> Option<Decimal> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Decimal = self.points.iter().map(|point| point.rate).sum();
        let average = sum / Decimal::from(self.points.len());
        Some(average.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// Everything the instructor dashboard shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorOverview {
    pub statistics: InstructorStatistics,
    pub trend: Dashboard,
}

impl InstructorOverview {
    /// Fetch the summary cards and the trend for the logged-in instructor
    ///
    /// Both requests run concurrently; either failing fails the overview.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` unless `session` is an instructor session,
    /// otherwise the first collaborator error.
    pub async fn load(
        analytics: &dyn AttendanceAnalytics,
        session: &Session,
        range: TrendRange,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        let profile = session.require(Role::Instructor)?;

        let (statistics, trend) = futures::future::join(
            analytics.fetch_instructor_statistics(&profile.id, cancel),
            Dashboard::load(analytics, range, cancel),
        )
        .await;

        Ok(InstructorOverview {
            statistics: statistics?,
            trend: trend?,
        })
    }
}

/// The student dashboard's attendance card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentOverview {
    pub attendance: StudentAttendance,
}

impl StudentOverview {
    /// Fetch the logged-in student's tally
    ///
    /// A tally whose total or rate disagrees with its counts is rebuilt from
    /// `present` and `absent`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` unless `session` is a student session,
    /// otherwise the collaborator error.
    pub async fn load(
        analytics: &dyn AttendanceAnalytics,
        session: &Session,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        let profile = session.require(Role::Student)?;
        let mut attendance = analytics.fetch_student_attendance(&profile.id, cancel).await?;

        if !attendance.is_consistent() {
            warn!(
                total = attendance.total,
                rate = %attendance.rate,
                "Inconsistent attendance tally, recomputing from counts"
            );
            attendance = StudentAttendance::from_counts(attendance.present, attendance.absent);
        }

        Ok(StudentOverview { attendance })
    }
}
