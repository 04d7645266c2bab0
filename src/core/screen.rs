//! Accounts management screen
//!
//! This module provides `AccountsScreen`, the list/edit/delete
//! reconciliation loop behind the admin Users screen. It coordinates the
//! [`AccountsStore`], the [`EditModal`] and the [`DeleteGate`], and turns
//! every outcome into a [`Notice`].
//!
//! The screen enforces:
//! - No optimistic updates: rows change only when a refetch completes
//! - A full refetch after every successful update, delete or create
//! - No remote call for drafts that fail validation
//! - The delete gate returns to idle after every attempt
//! - Nothing is mutated after `teardown()`; in-flight calls resolve to
//!   `Cancelled` and are dropped, whatever the server answered

use crate::api::AccountsApi;
use crate::core::accounts_store::{AccountsStore, MergePolicy};
use crate::core::delete_gate::DeleteGate;
use crate::core::edit_modal::{EditDraft, EditModal};
use crate::core::filter;
use crate::core::session::{Role, Session};
use crate::types::{Account, AccountId, AccountType, ClientError, Notice};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const FETCH_FAILED: &str = "Failed to fetch accounts";
pub const PARTIAL_FETCH: &str = "Some accounts could not be loaded";
pub const UPDATE_SUCCEEDED: &str = "Account updated successfully";
pub const DELETE_FAILED: &str = "Failed to delete";
pub const LOADING_MESSAGE: &str = "Loading accounts...";
pub const EMPTY_MESSAGE: &str = "No accounts found";

type UpdateListener = Box<dyn Fn(usize) + Send + Sync>;

/// Screen-level state for the admin accounts list
pub struct AccountsScreen {
    api: Arc<dyn AccountsApi>,
    policy: MergePolicy,
    store: AccountsStore,
    edit: EditModal,
    delete: DeleteGate,
    search: String,
    notices: Vec<Notice>,
    loading: bool,
    loaded: bool,
    cancel: CancellationToken,
    on_update: Option<UpdateListener>,
}

impl AccountsScreen {
    /// Open the screen for an admin session
    ///
    /// The list starts empty and in the loading state; call [`refresh`]
    /// to populate it.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` unless `session` is logged in as admin.
    ///
    /// [`refresh`]: AccountsScreen::refresh
    pub fn new(
        api: Arc<dyn AccountsApi>,
        session: &Session,
        policy: MergePolicy,
    ) -> Result<Self, ClientError> {
        session.require(Role::Admin)?;

        Ok(Self {
            api,
            policy,
            store: AccountsStore::new(),
            edit: EditModal::new(),
            delete: DeleteGate::new(),
            search: String::new(),
            notices: Vec::new(),
            loading: true,
            loaded: false,
            cancel: CancellationToken::new(),
            on_update: None,
        })
    }

    /// Register a callback run after every applied refresh with the new row count
    pub fn on_update<F>(&mut self, listener: F)
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_update = Some(Box::new(listener));
    }

    // ----- read side -----

    pub fn accounts(&self) -> &[Account] {
        self.store.accounts()
    }

    /// Row with the given type and server id
    pub fn find(&self, kind: AccountType, id: &AccountId) -> Option<&Account> {
        self.store.find(kind, id)
    }

    /// Rows matching the current search text
    pub fn visible_accounts(&self) -> Vec<&Account> {
        filter::search(self.store.accounts(), &self.search)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether any refresh has been applied since the screen opened
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Placeholder text for an empty table
    pub fn empty_message(&self) -> &'static str {
        if self.loading {
            LOADING_MESSAGE
        } else {
            EMPTY_MESSAGE
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Drain notices, e.g. once they have been shown
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn edit_modal(&self) -> &EditModal {
        &self.edit
    }

    pub fn delete_gate(&self) -> &DeleteGate {
        &self.delete
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.delete.prompt()
    }

    // ----- lifecycle -----

    /// Token that fires when the screen is torn down
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel every in-flight call; late results are discarded
    pub fn teardown(&self) {
        debug!("Accounts screen torn down");
        self.cancel.cancel();
    }

    // ----- fetch -----

    /// Refetch both collections and replace the list
    ///
    /// On failure the previous list stays visible and a notice is pushed.
    ///
    /// # Errors
    ///
    /// Returns the error that abandoned the merge (including `Cancelled`).
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if self.is_torn_down() {
            return Err(ClientError::Cancelled);
        }
        self.loading = true;

        let result = self
            .store
            .refresh(self.api.as_ref(), self.policy, &self.cancel)
            .await;
        if self.is_torn_down() {
            return Err(ClientError::Cancelled);
        }

        match result {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(error) => {
                self.loading = false;
                self.notices.push(Notice::error(FETCH_FAILED));
                Err(error)
            }
            Ok(summary) => {
                self.loading = false;
                self.loaded = true;
                if !summary.failed.is_empty() {
                    self.notices.push(Notice::error(PARTIAL_FETCH));
                }
                if let Some(listener) = &self.on_update {
                    listener(summary.total);
                }
                Ok(())
            }
        }
    }

    /// The create flow lives elsewhere and reports back here on success
    pub async fn handle_create_success(&mut self) -> Result<(), ClientError> {
        self.refresh().await
    }

    // ----- edit -----

    /// Open the edit modal on `account`
    pub fn begin_edit(&mut self, account: &Account) {
        self.edit.open(account);
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.edit.draft_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.edit.close();
    }

    /// Validate the draft, send the update and refetch on success
    ///
    /// The modal closes only on success. Validation failures never reach the
    /// server.
    ///
    /// # Errors
    ///
    /// Returns the validation or remote error that was turned into a notice.
    pub async fn save_edit(&mut self) -> Result<(), ClientError> {
        let (target, body) = match self.edit.validate() {
            Ok(validated) => validated,
            Err(error) => {
                self.notices.push(Notice::validation(error.to_string()));
                return Err(error);
            }
        };

        let result = self
            .api
            .update_account(target.kind, &target.id, &body, &self.cancel)
            .await;
        if self.is_torn_down() {
            return Err(ClientError::Cancelled);
        }

        match result {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(error) => {
                warn!(%error, id = %target.id, "Update failed");
                self.notices.push(Notice::error(format!(
                    "Failed to update account: {}",
                    update_failure_detail(&error)
                )));
                Err(error)
            }
            Ok(()) => {
                self.edit.close();
                // a failed refetch already pushed its own notice
                if let Err(ClientError::Cancelled) = self.refresh().await {
                    return Err(ClientError::Cancelled);
                }
                self.notices.push(Notice::success(UPDATE_SUCCEEDED));
                Ok(())
            }
        }
    }

    // ----- delete -----

    /// Ask for confirmation before deleting `account`
    ///
    /// Returns `false` if a delete is already in flight.
    pub fn request_delete(&mut self, account: &Account) -> bool {
        self.delete.request(account)
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Delete the account awaiting confirmation
    ///
    /// Issues exactly one DELETE for the pending target, or nothing when no
    /// confirmation is pending. The gate is back to idle when this returns.
    ///
    /// # Errors
    ///
    /// Returns the remote error that was turned into a notice.
    pub async fn confirm_delete(&mut self) -> Result<(), ClientError> {
        let Some(target) = self.delete.confirm() else {
            return Ok(());
        };

        let result = self
            .api
            .delete_account(target.kind, &target.id, &self.cancel)
            .await;
        if self.is_torn_down() {
            return Err(ClientError::Cancelled);
        }
        self.delete.finish();

        match result {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(error) => {
                warn!(%error, id = %target.id, "Delete failed");
                self.notices.push(Notice::error(DELETE_FAILED));
                Err(error)
            }
            Ok(()) => {
                if let Err(ClientError::Cancelled) = self.refresh().await {
                    return Err(ClientError::Cancelled);
                }
                self.notices.push(Notice::success(format!(
                    "{} deleted successfully",
                    target.kind.label()
                )));
                Ok(())
            }
        }
    }
}

/// Text after "Failed to update account: "
fn update_failure_detail(error: &ClientError) -> String {
    match error {
        ClientError::Status { message, .. } => message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string()),
        ClientError::Transport { message } | ClientError::Decode { message } => message.clone(),
        other => other.to_string(),
    }
}
