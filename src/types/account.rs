//! Account-related types for the attendance admin client
//!
//! This module defines the Account projection shown in the admin accounts
//! list, the wire records it is built from, and the update body sent back
//! to the server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned account identifier
///
/// Opaque to the client. It is only ever echoed back in update and delete
/// paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which remote collection an account came from
///
/// The server does not store this on the record; it is derived at merge
/// time from the collection the record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Student,
    Instructor,
}

impl AccountType {
    /// All account types, in merge order
    pub const ALL: [AccountType; 2] = [AccountType::Student, AccountType::Instructor];

    /// Path segment of the remote collection (`students` / `instructors`)
    pub fn collection(self) -> &'static str {
        match self {
            AccountType::Student => "students",
            AccountType::Instructor => "instructors",
        }
    }

    /// Display label used in the table and in notices
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Student => "Student",
            AccountType::Instructor => "Instructor",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A Student or Instructor record as displayed in the admin accounts list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Server-assigned identifier
    pub id: AccountId,

    /// Human-assigned identifier, presumed unique per type
    pub id_number: String,

    /// Display name (`fullName` on the wire)
    pub name: String,

    /// Origin collection
    pub kind: AccountType,
}

impl Account {
    /// Tag a wire record with the collection it was fetched from
    ///
    /// # Arguments
    ///
    /// * `record` - The record as returned by the collection endpoint
    /// * `kind` - The collection the record came from
    pub fn from_remote(record: RemoteAccount, kind: AccountType) -> Self {
        Account {
            id: record.id,
            id_number: record.id_number,
            name: record.full_name,
            kind,
        }
    }
}

/// Account record as served by `GET /api/students` and `GET /api/instructors`
///
/// Unknown fields are ignored. Missing `idNumber`/`fullName` deserialize to
/// empty strings rather than failing the whole collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteAccount {
    #[serde(rename = "_id", alias = "id")]
    pub id: AccountId,

    #[serde(rename = "idNumber", default)]
    pub id_number: String,

    #[serde(rename = "fullName", default)]
    pub full_name: String,
}

/// Body of `PUT /api/{students|instructors}/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAccountRequest {
    #[serde(rename = "idNumber")]
    pub id_number: String,

    #[serde(rename = "fullName")]
    pub full_name: String,
}
