//! I/O module
//!
//! Handles CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_dispute_row, convert_transaction_row, write_groups_csv, write_options_csv,
    write_records_csv, CsvDisputeRow, CsvTransactionRow, FromCsvRow,
};
pub use sync_reader::SyncReader;
