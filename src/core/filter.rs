//! Client-side search over the fetched accounts list
//!
//! Case-insensitive substring match against the ID number, the name and the
//! type label. A blank query matches every row. Nothing here talks to the
//! server.

use crate::types::Account;

/// Return the accounts matching `query`, preserving list order
pub fn search<'a>(accounts: &'a [Account], query: &str) -> Vec<&'a Account> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return accounts.iter().collect();
    }

    accounts
        .iter()
        .filter(|account| matches(account, &needle))
        .collect()
}

/// `needle` must already be lowercased
fn matches(account: &Account, needle: &str) -> bool {
    [
        account.id_number.as_str(),
        account.name.as_str(),
        account.kind.label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
