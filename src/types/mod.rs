//! Types module
//!
//! Contains core data structures used throughout the client.
//! This module organizes types into logical submodules:
//! - `account`: Account projection, wire records and update bodies
//! - `notice`: User-visible outcome messages
//! - `trend`: Attendance trend contract types
//! - `stats`: Dashboard summary statistics
//! - `error`: Error types for the client

pub mod account;
pub mod error;
pub mod notice;
pub mod stats;
pub mod trend;

pub use account::{Account, AccountId, AccountType, RemoteAccount, UpdateAccountRequest};
pub use error::ClientError;
pub use notice::{Notice, NoticeKind};
pub use stats::{InstructorStatistics, StudentAttendance};
pub use trend::{TrendPoint, TrendRange};
