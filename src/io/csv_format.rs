//! CSV export of the accounts list
//!
//! All functions are pure (no file handling) for easy testing; the caller
//! passes the writer.

use crate::types::{Account, ClientError};
use serde::Serialize;
use std::io::Write;

/// One output row
#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    id: &'a str,
    #[serde(rename = "idNumber")]
    id_number: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

/// Write accounts as CSV with columns: id, idNumber, name, type
///
/// Rows are written in the order given. The header is written even when
/// there are no rows.
///
/// # Arguments
///
/// * `accounts` - Rows to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_accounts_csv(
    accounts: &[&Account],
    output: &mut dyn Write,
) -> Result<(), ClientError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(["id", "idNumber", "name", "type"])?;
    for account in accounts {
        writer.serialize(AccountRow {
            id: account.id.as_str(),
            id_number: &account.id_number,
            name: &account.name,
            kind: account.kind.label(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, AccountType};

    fn account(id: &str, id_number: &str, name: &str, kind: AccountType) -> Account {
        Account {
            id: AccountId::new(id),
            id_number: id_number.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn test_write_accounts_csv() {
        let rows = vec![
            account("a", "S1", "Ana Cruz", AccountType::Student),
            account("b", "I1", "Reyes, Carla", AccountType::Instructor),
        ];
        let refs: Vec<&Account> = rows.iter().collect();
        let mut output = Vec::new();

        write_accounts_csv(&refs, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "id,idNumber,name,type\na,S1,Ana Cruz,Student\nb,I1,\"Reyes, Carla\",Instructor\n"
        );
    }

    #[test]
    fn test_empty_list_writes_header_only() {
        let mut output = Vec::new();
        write_accounts_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "id,idNumber,name,type\n");
    }
}
