//! Collaborator traits for the remote API
//!
//! The screen logic in [`crate::core`] only talks to these traits, so the
//! HTTP client can be swapped for an in-memory fake in tests. Every call
//! takes the owning screen's cancellation token.

use crate::types::{
    AccountId, AccountType, ClientError, InstructorStatistics, RemoteAccount, StudentAttendance,
    TrendPoint, TrendRange, UpdateAccountRequest,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Account collection endpoints
///
/// Success and failure are told apart by HTTP status only. Implementations
/// map a non-success status to [`ClientError::Status`], carrying the body's
/// `message` field when there is one.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// `GET /api/{students|instructors}`
    async fn list_accounts(
        &self,
        kind: AccountType,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteAccount>, ClientError>;

    /// `PUT /api/{students|instructors}/{id}`
    async fn update_account(
        &self,
        kind: AccountType,
        id: &AccountId,
        body: &UpdateAccountRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError>;

    /// `DELETE /api/{students|instructors}/{id}`
    async fn delete_account(
        &self,
        kind: AccountType,
        id: &AccountId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError>;

    /// `POST /api/students/logout`
    async fn logout_student(
        &self,
        id_number: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError>;
}

/// Source of attendance statistics for the dashboards
#[async_trait]
pub trait AttendanceAnalytics: Send + Sync {
    /// Daily attendance rates for `range`, ordered by date
    async fn fetch_attendance_trend(
        &self,
        range: TrendRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrendPoint>, ClientError>;

    /// Summary cards for the instructor with profile id `instructor_id`
    async fn fetch_instructor_statistics(
        &self,
        instructor_id: &str,
        cancel: &CancellationToken,
    ) -> Result<InstructorStatistics, ClientError>;

    /// Attendance tally for the student with ID number `student_id`
    async fn fetch_student_attendance(
        &self,
        student_id: &str,
        cancel: &CancellationToken,
    ) -> Result<StudentAttendance, ClientError>;
}
