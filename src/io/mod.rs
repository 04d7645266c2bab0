//! I/O module
//!
//! Handles output of the accounts list.
//!
//! # Components
//!
//! - `csv_format` - CSV export
//! - `table` - Aligned plain-text table for terminals

pub mod csv_format;
pub mod table;

pub use csv_format::write_accounts_csv;
pub use table::render_table;
