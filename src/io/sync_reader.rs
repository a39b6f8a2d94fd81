//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over dashboard records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize rows sequentially,
//! delegating conversion to [`FromCsvRow`]. The same reader serves
//! transaction and dispute listings; the record type picks the row shape.
//!
//! ```no_run
//! use escrow_dashboard_engine::io::sync_reader::SyncReader;
//! use escrow_dashboard_engine::Transaction;
//! use std::path::Path;
//!
//! let reader = SyncReader::<Transaction>::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Loaded {}", record.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator,
//!   tagged with their line number (the header is line 1)

use crate::io::csv_format::FromCsvRow;
use crate::types::DashboardError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader yielding records of type `T`
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    line_num: u64,
    _record: PhantomData<fn() -> T>,
}

impl<T: FromCsvRow> SyncReader<T> {
    /// Open a CSV file for streaming iteration
    ///
    /// The reader trims whitespace from all fields and allows short rows so
    /// trailing optional columns may be omitted.
    pub fn new(path: &Path) -> Result<Self, DashboardError> {
        let file = File::open(path).map_err(|e| DashboardError::open_failed(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
            _record: PhantomData,
        })
    }
}

impl<T: FromCsvRow> Iterator for SyncReader<T> {
    type Item = Result<T, DashboardError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<T::Row>();
        let result = rows.next()?;
        self.line_num += 1;

        Some(match result {
            Ok(row) => T::from_csv_row(row).map_err(|e| e.at_line(self.line_num)),
            Err(e) => Err(DashboardError::from(e).at_line(self.line_num)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dispute, Priority, Transaction};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const HEADER: &str = "id,amount,currency,buyer,seller,status\n";

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::<Transaction>::new(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(DashboardError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_reader_reads_transaction() {
        let file = create_temp_csv(&format!(
            "{}TXN78901,1.5,ETH,Alice B.,Bob C.,Funds Locked\n",
            HEADER
        ));

        let records: Vec<_> = SyncReader::<Transaction>::new(file.path())
            .unwrap()
            .collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.id, "TXN78901");
        assert_eq!(record.amount.value, Decimal::new(15, 1));
        assert_eq!(record.buyer, "Alice B.");
        assert_eq!(record.status, "Funds Locked");
    }

    #[test]
    fn test_sync_reader_trims_whitespace() {
        let file = create_temp_csv(&format!(
            "{}  TXN1 ,  500  , USDC ,  Charlie D. , Diana E. ,  Funds Locked \n",
            HEADER
        ));

        let records: Vec<_> = SyncReader::<Transaction>::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "TXN1");
        assert_eq!(records[0].amount.currency, "USDC");
        assert_eq!(records[0].status, "Funds Locked");
    }

    #[test]
    fn test_sync_reader_reports_line_numbers_and_continues() {
        let file = create_temp_csv(&format!(
            "{}TXN1,1,ETH,A,B,Fulfilled\nTXN2,abc,ETH,A,B,Fulfilled\nTXN3,2,ETH,A,B,\nTXN4,3,BTC,A,B,Refunded\n",
            HEADER
        ));

        let records: Vec<_> = SyncReader::<Transaction>::new(file.path())
            .unwrap()
            .collect();

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        assert_eq!(
            records[1].as_ref().unwrap_err(),
            &DashboardError::invalid_amount("abc", "TXN2")
        );
        assert_eq!(
            records[2].as_ref().unwrap_err(),
            &DashboardError::missing_field("status", Some(4))
        );
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_sync_reader_empty_file_after_header() {
        let file = create_temp_csv(HEADER);
        let records: Vec<_> = SyncReader::<Transaction>::new(file.path())
            .unwrap()
            .collect();
        assert!(records.is_empty());
    }

    #[test]
    fn test_sync_reader_reads_disputes_with_short_rows() {
        let file = create_temp_csv(
            "id,amount,currency,buyer,buyer_address,seller,seller_address,status,priority,decision_expected,last_action,last_action_by\n\
             TXN78898,2.0,ETH,Ivan J.,0xAbc,Kelly L.,0xDef,Under Review,High Priority,Within 3 days,Evidence submitted,buyer\n\
             TXN78895,750,USDC,Mike P.,,Sarah Q.,,Awaiting Response\n",
        );

        let records: Vec<_> = SyncReader::<Dispute>::new(file.path())
            .unwrap()
            .collect();

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.priority, Some(Priority::High));
        assert_eq!(first.buyer.address.as_deref(), Some("0xAbc"));

        let second = records[1].as_ref().unwrap();
        assert_eq!(second.status, "Awaiting Response");
        assert_eq!(second.priority, None);
        assert_eq!(second.buyer.address, None);
    }
}
