//! Accounts store
//!
//! This module provides the `AccountsStore`, the client-side projection of
//! the two remote account collections.
//!
//! The store is responsible for:
//! - Fetching the student and instructor collections concurrently
//! - Tagging each record with the collection it came from
//! - Replacing the whole list on success (no diffing, no patching)
//! - Leaving the previous list untouched when the fetch is abandoned

use crate::api::AccountsApi;
use crate::types::{Account, AccountId, AccountType, ClientError, RemoteAccount};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Policy for a dual fetch where only one collection loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Any failure abandons the merge; the previous list stays visible
    #[default]
    AbortAll,
    /// Show whichever collections loaded; abandon only if both failed
    BestEffort,
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// Students first, then instructors
    pub accounts: Vec<Account>,
    /// Collections that failed under [`MergePolicy::BestEffort`]
    pub failed: Vec<(AccountType, ClientError)>,
}

impl Merged {
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Summary of an applied refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub total: usize,
    pub failed: Vec<AccountType>,
}

/// Merge the two collection results according to `policy`
///
/// Cancellation always abandons the merge, whatever the policy.
///
/// # Arguments
///
/// * `students` - Result of `GET /api/students`
/// * `instructors` - Result of `GET /api/instructors`
/// * `policy` - How to treat a single failing collection
///
/// # Returns
///
/// * `Ok(Merged)` with students first, instructors second
/// * `Err(ClientError)` with the first failure when the merge is abandoned
pub fn merge(
    students: Result<Vec<RemoteAccount>, ClientError>,
    instructors: Result<Vec<RemoteAccount>, ClientError>,
    policy: MergePolicy,
) -> Result<Merged, ClientError> {
    let results = [
        (AccountType::Student, students),
        (AccountType::Instructor, instructors),
    ];

    if results
        .iter()
        .any(|(_, result)| matches!(result, Err(ClientError::Cancelled)))
    {
        return Err(ClientError::Cancelled);
    }

    let mut accounts = Vec::new();
    let mut failed = Vec::new();

    for (kind, result) in results {
        match result {
            Ok(records) => accounts.extend(
                records
                    .into_iter()
                    .map(|record| Account::from_remote(record, kind)),
            ),
            Err(error) => failed.push((kind, error)),
        }
    }

    let abandon = match policy {
        MergePolicy::AbortAll => !failed.is_empty(),
        MergePolicy::BestEffort => failed.len() == AccountType::ALL.len(),
    };
    if abandon {
        let (_, first) = failed.swap_remove(0);
        return Err(first);
    }

    Ok(Merged { accounts, failed })
}

/// Fetch both collections concurrently and merge them
pub async fn fetch_merged(
    api: &dyn AccountsApi,
    policy: MergePolicy,
    cancel: &CancellationToken,
) -> Result<Merged, ClientError> {
    let (students, instructors) = futures::future::join(
        api.list_accounts(AccountType::Student, cancel),
        api.list_accounts(AccountType::Instructor, cancel),
    )
    .await;

    merge(students, instructors, policy)
}

/// Ordered, read-through copy of the remote accounts
#[derive(Debug, Default)]
pub struct AccountsStore {
    accounts: Vec<Account>,
}

impl AccountsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up a row by type and server id
    pub fn find(&self, kind: AccountType, id: &AccountId) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.kind == kind && &account.id == id)
    }

    /// Replace the whole list
    pub fn replace(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// Refetch both collections and replace the list
    ///
    /// The list is only touched when the merge succeeds and `cancel` has not
    /// fired in the meantime.
    ///
    /// # Errors
    ///
    /// Returns the merge error (or `Cancelled`); the previous list is kept.
    pub async fn refresh(
        &mut self,
        api: &dyn AccountsApi,
        policy: MergePolicy,
        cancel: &CancellationToken,
    ) -> Result<RefreshSummary, ClientError> {
        let merged = match fetch_merged(api, policy, cancel).await {
            Ok(merged) => merged,
            Err(error) => {
                if !error.is_cancelled() {
                    warn!(%error, "Account refresh abandoned");
                }
                return Err(error);
            }
        };

        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        for (kind, error) in &merged.failed {
            warn!(collection = kind.collection(), %error, "Collection failed to load");
        }

        let summary = RefreshSummary {
            total: merged.accounts.len(),
            failed: merged.failed.iter().map(|(kind, _)| *kind).collect(),
        };
        self.replace(merged.accounts);
        info!(total = summary.total, "Accounts refreshed");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn records(prefix: &str, n: usize) -> Vec<RemoteAccount> {
        (1..=n)
            .map(|i| RemoteAccount {
                id: AccountId::new(format!("{}-id-{}", prefix, i)),
                id_number: format!("{}{}", prefix, i),
                full_name: format!("Person {}{}", prefix, i),
            })
            .collect()
    }

    fn boom() -> ClientError {
        ClientError::status(500, None)
    }

    #[rstest]
    #[case::abort_all(MergePolicy::AbortAll)]
    #[case::best_effort(MergePolicy::BestEffort)]
    fn test_merge_success_tags_and_orders(#[case] policy: MergePolicy) {
        let merged = merge(Ok(records("S", 2)), Ok(records("I", 1)), policy).unwrap();

        assert_eq!(merged.accounts.len(), 3);
        assert!(!merged.is_partial());
        let kinds: Vec<AccountType> = merged.accounts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AccountType::Student, AccountType::Student, AccountType::Instructor]
        );
        assert_eq!(merged.accounts[2].name, "Person I1");
    }

    #[rstest]
    #[case::students_fail(Err(boom()), Ok(records("I", 1)))]
    #[case::instructors_fail(Ok(records("S", 2)), Err(boom()))]
    #[case::both_fail(Err(boom()), Err(ClientError::transport("down")))]
    fn test_abort_all_abandons_on_any_failure(
        #[case] students: Result<Vec<RemoteAccount>, ClientError>,
        #[case] instructors: Result<Vec<RemoteAccount>, ClientError>,
    ) {
        assert!(merge(students, instructors, MergePolicy::AbortAll).is_err());
    }

    #[rstest]
    #[case::students_fail(Err(boom()), Ok(records("I", 1)), 1, AccountType::Student)]
    #[case::instructors_fail(Ok(records("S", 2)), Err(boom()), 2, AccountType::Instructor)]
    fn test_best_effort_keeps_the_half_that_loaded(
        #[case] students: Result<Vec<RemoteAccount>, ClientError>,
        #[case] instructors: Result<Vec<RemoteAccount>, ClientError>,
        #[case] expected_len: usize,
        #[case] failed_kind: AccountType,
    ) {
        let merged = merge(students, instructors, MergePolicy::BestEffort).unwrap();

        assert_eq!(merged.accounts.len(), expected_len);
        assert_eq!(merged.failed, vec![(failed_kind, boom())]);
        assert!(merged.accounts.iter().all(|a| a.kind != failed_kind));
    }

    #[test]
    fn test_best_effort_abandons_when_both_fail() {
        let result = merge(
            Err(boom()),
            Err(ClientError::transport("down")),
            MergePolicy::BestEffort,
        );
        assert_eq!(result, Err(boom()));
    }

    #[rstest]
    #[case::abort_all(MergePolicy::AbortAll)]
    #[case::best_effort(MergePolicy::BestEffort)]
    fn test_cancellation_always_abandons(#[case] policy: MergePolicy) {
        let result = merge(Ok(records("S", 1)), Err(ClientError::Cancelled), policy);
        assert_eq!(result, Err(ClientError::Cancelled));
    }

    #[test]
    fn test_find_matches_kind_and_id() {
        let merged =
            merge(Ok(records("S", 1)), Ok(records("I", 1)), MergePolicy::AbortAll).unwrap();
        let mut store = AccountsStore::new();
        store.replace(merged.accounts);

        let id = AccountId::new("I-id-1");
        assert_eq!(
            store.find(AccountType::Instructor, &id).map(|a| a.id_number.as_str()),
            Some("I1")
        );
        assert!(store.find(AccountType::Student, &id).is_none());
    }

    #[test]
    fn test_merge_policy_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: MergePolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"best-effort\"").unwrap();
        assert_eq!(parsed.policy, MergePolicy::BestEffort);
    }
}
