//! Edit modal state
//!
//! Holds the account being edited and a free-form draft of its two editable
//! fields. The draft lives exactly as long as the modal: opening seeds it
//! from the account, closing (save or cancel) drops it.

use crate::types::{Account, ClientError, UpdateAccountRequest};

pub const VALIDATION_MESSAGE: &str = "Please fill in both ID Number and Name";

/// Unsaved edits for one account
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditDraft {
    pub id_number: String,
    pub name: String,
}

impl EditDraft {
    fn from_account(account: &Account) -> Self {
        EditDraft {
            id_number: account.id_number.clone(),
            name: account.name.clone(),
        }
    }

    /// Reject blank fields (after trimming)
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.id_number.trim().is_empty() || self.name.trim().is_empty() {
            return Err(ClientError::validation(VALIDATION_MESSAGE));
        }
        Ok(())
    }

    /// Map the draft to the update body; values are sent as typed
    pub fn to_request(&self) -> UpdateAccountRequest {
        UpdateAccountRequest {
            id_number: self.id_number.clone(),
            full_name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct OpenEdit {
    target: Account,
    draft: EditDraft,
}

/// The edit modal: closed, or open on one account with a draft
#[derive(Debug, Clone, Default)]
pub struct EditModal {
    open: Option<OpenEdit>,
}

impl EditModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on `account`, replacing any draft already in progress
    pub fn open(&mut self, account: &Account) {
        self.open = Some(OpenEdit {
            target: account.clone(),
            draft: EditDraft::from_account(account),
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn target(&self) -> Option<&Account> {
        self.open.as_ref().map(|open| &open.target)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.open.as_ref().map(|open| &open.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.open.as_mut().map(|open| &mut open.draft)
    }

    /// Validate the draft and produce the account to update plus the body
    ///
    /// # Errors
    ///
    /// Returns a Validation error if the modal is closed or a field is blank.
    pub fn validate(&self) -> Result<(Account, UpdateAccountRequest), ClientError> {
        let open = self
            .open
            .as_ref()
            .ok_or_else(|| ClientError::validation("No account selected"))?;

        open.draft.validate()?;
        Ok((open.target.clone(), open.draft.to_request()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, AccountType};
    use rstest::rstest;

    fn student() -> Account {
        Account {
            id: AccountId::new("65a1"),
            id_number: "S1".to_string(),
            name: "Ana Cruz".to_string(),
            kind: AccountType::Student,
        }
    }

    #[test]
    fn test_open_prefills_draft() {
        let mut modal = EditModal::new();
        modal.open(&student());

        assert!(modal.is_open());
        assert_eq!(
            modal.draft(),
            Some(&EditDraft {
                id_number: "S1".to_string(),
                name: "Ana Cruz".to_string(),
            })
        );
    }

    #[test]
    fn test_close_discards_draft() {
        let mut modal = EditModal::new();
        modal.open(&student());
        modal.draft_mut().unwrap().name = "Changed".to_string();
        modal.close();

        assert!(!modal.is_open());
        assert!(modal.draft().is_none());

        modal.open(&student());
        assert_eq!(modal.draft().unwrap().name, "Ana Cruz");
    }

    #[rstest]
    #[case::empty_id("", "Jane Doe")]
    #[case::blank_id("   ", "Jane Doe")]
    #[case::empty_name("S1", "")]
    #[case::blank_name("S1", "\t ")]
    #[case::both_empty("", "")]
    fn test_blank_fields_are_rejected(#[case] id_number: &str, #[case] name: &str) {
        let mut modal = EditModal::new();
        modal.open(&student());
        let draft = modal.draft_mut().unwrap();
        draft.id_number = id_number.to_string();
        draft.name = name.to_string();

        assert_eq!(
            modal.validate(),
            Err(ClientError::validation(VALIDATION_MESSAGE))
        );
    }

    #[test]
    fn test_validate_maps_name_to_full_name() {
        let mut modal = EditModal::new();
        modal.open(&student());
        modal.draft_mut().unwrap().name = "Jane Doe".to_string();

        let (target, body) = modal.validate().unwrap();
        assert_eq!(target.id, AccountId::new("65a1"));
        assert_eq!(body.id_number, "S1");
        assert_eq!(body.full_name, "Jane Doe");
    }

    #[test]
    fn test_validate_closed_modal() {
        let modal = EditModal::new();
        assert!(matches!(
            modal.validate(),
            Err(ClientError::Validation { .. })
        ));
    }
}
