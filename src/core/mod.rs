//! Core screen logic module
//!
//! This module contains the client-side state behind the admin screens:
//! - `accounts_store` - Concurrent dual fetch, merge policy and the accounts list
//! - `edit_modal` - Edit draft lifetime and validation
//! - `delete_gate` - Confirm gate in front of deletion
//! - `filter` - Client-side search
//! - `session` - Authentication state
//! - `screen` - The accounts screen tying the above together
//! - `dashboard` - Trend and summary figures for the instructor and student dashboards

pub mod accounts_store;
pub mod dashboard;
pub mod delete_gate;
pub mod edit_modal;
pub mod filter;
pub mod screen;
pub mod session;

pub use accounts_store::{fetch_merged, merge, AccountsStore, MergePolicy, Merged, RefreshSummary};
pub use dashboard::{Dashboard, InstructorOverview, StudentOverview};
pub use delete_gate::{DeleteGate, DeleteState};
pub use edit_modal::{EditDraft, EditModal};
pub use screen::AccountsScreen;
pub use session::{AuthState, Profile, Role, Session};
