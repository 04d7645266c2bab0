//! Attendance Admin Client Library
//! # Overview
//!
//! Client-side logic for the admin accounts screen of a school attendance
//! system: fetch the student and instructor collections, merge them into one
//! tagged list, search it, and edit or delete accounts through the remote
//! API. Small dashboard helpers shape attendance trends and summary figures
//! from an analytics collaborator.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Notice, TrendPoint, errors)
//! - [`api`] - Remote API traits, request signing and the HTTP client
//! - [`core`] - Screen logic:
//!   - [`core::accounts_store`] - Concurrent dual fetch and merge policy
//!   - [`core::edit_modal`] - Edit draft and validation
//!   - [`core::delete_gate`] - Confirm gate before deletion
//!   - [`core::screen`] - The accounts screen reconciliation loop
//!   - [`core::session`] - Authentication state
//! - [`config`] - Layered client configuration
//! - [`io`] - Table and CSV output
//! - [`cli`] - CLI arguments parsing
//!
//! # Reconciliation
//!
//! The client never patches its list. Every successful update, delete or
//! create is followed by a full refetch, and the refetch that completes last
//! decides what is shown. Failures leave the current list in place and
//! produce a [`types::Notice`].

// Module declarations
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use api::{AccountsApi, AttendanceAnalytics, HttpApiClient};
pub use config::ClientConfig;
pub use core::{AccountsScreen, AccountsStore, MergePolicy, Session};
pub use types::{Account, AccountId, AccountType, ClientError, Notice, NoticeKind};
