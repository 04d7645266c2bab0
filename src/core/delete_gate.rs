//! Two-step confirm gate in front of account deletion
//!
//! ```text
//! Idle ──request──▶ ConfirmPending ──confirm──▶ Deleting ──finish──▶ Idle
//!                        │
//!                        └──cancel──▶ Idle
//! ```
//!
//! Only `confirm` hands out a target to delete. Every other path drops the
//! target without side effects.

use crate::types::Account;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Idle,
    /// Waiting for the user to confirm deleting this account
    ConfirmPending(Account),
    /// Remote delete in flight
    Deleting(Account),
}

#[derive(Debug, Clone, Default)]
pub struct DeleteGate {
    state: DeleteState,
}

impl DeleteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DeleteState::Idle)
    }

    /// Account awaiting confirmation or being deleted
    pub fn target(&self) -> Option<&Account> {
        match &self.state {
            DeleteState::Idle => None,
            DeleteState::ConfirmPending(account) | DeleteState::Deleting(account) => Some(account),
        }
    }

    /// Ask for confirmation before deleting `account`
    ///
    /// Re-requesting while a confirmation is pending retargets it. Returns
    /// `false` (and changes nothing) while a delete is in flight.
    pub fn request(&mut self, account: &Account) -> bool {
        if matches!(self.state, DeleteState::Deleting(_)) {
            return false;
        }
        self.state = DeleteState::ConfirmPending(account.clone());
        true
    }

    /// Dismiss a pending confirmation
    pub fn cancel(&mut self) {
        if matches!(self.state, DeleteState::ConfirmPending(_)) {
            self.state = DeleteState::Idle;
        }
    }

    /// Confirm the pending delete and move to `Deleting`
    ///
    /// Returns the account to delete, or `None` when nothing was pending.
    pub fn confirm(&mut self) -> Option<Account> {
        match std::mem::take(&mut self.state) {
            DeleteState::ConfirmPending(account) => {
                self.state = DeleteState::Deleting(account.clone());
                Some(account)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Return to `Idle` after a delete attempt, whatever its outcome
    pub fn finish(&mut self) {
        self.state = DeleteState::Idle;
    }

    /// Confirmation prompt for the pending target
    pub fn prompt(&self) -> Option<String> {
        match &self.state {
            DeleteState::ConfirmPending(account) => Some(format!(
                "Are you sure you want to delete this {}?",
                account.kind.label().to_lowercase()
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, AccountType};

    fn instructor() -> Account {
        Account {
            id: AccountId::new("i-1"),
            id_number: "I1".to_string(),
            name: "Carla Reyes".to_string(),
            kind: AccountType::Instructor,
        }
    }

    #[test]
    fn test_request_then_confirm_then_finish() {
        let mut gate = DeleteGate::new();
        assert!(gate.request(&instructor()));
        assert_eq!(gate.state(), &DeleteState::ConfirmPending(instructor()));

        assert_eq!(gate.confirm(), Some(instructor()));
        assert_eq!(gate.state(), &DeleteState::Deleting(instructor()));

        gate.finish();
        assert!(gate.is_idle());
        assert!(gate.target().is_none());
    }

    #[test]
    fn test_cancel_discards_target() {
        let mut gate = DeleteGate::new();
        gate.request(&instructor());
        gate.cancel();

        assert!(gate.is_idle());
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let mut gate = DeleteGate::new();
        assert_eq!(gate.confirm(), None);
        assert!(gate.is_idle());
    }

    #[test]
    fn test_request_rejected_while_deleting() {
        let mut gate = DeleteGate::new();
        gate.request(&instructor());
        gate.confirm();

        let mut other = instructor();
        other.id = AccountId::new("i-2");
        assert!(!gate.request(&other));
        assert_eq!(gate.target(), Some(&instructor()));

        // cancel does not abort an in-flight delete
        gate.cancel();
        assert_eq!(gate.state(), &DeleteState::Deleting(instructor()));
    }

    #[test]
    fn test_prompt_uses_lowercase_type() {
        let mut gate = DeleteGate::new();
        assert_eq!(gate.prompt(), None);

        gate.request(&instructor());
        assert_eq!(
            gate.prompt().as_deref(),
            Some("Are you sure you want to delete this instructor?")
        );
    }
}
