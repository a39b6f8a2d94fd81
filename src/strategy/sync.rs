//! Synchronous processing strategy
//!
//! Reads each input in turn through [`SyncReader`], streaming rows one at a
//! time. A source that cannot be opened or read aborts the run; malformed
//! rows are logged and skipped.

use crate::io::csv_format::FromCsvRow;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{DashboardError, Dispute, Transaction};
use std::path::PathBuf;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use escrow_dashboard_engine::report::ReportConfig;
/// use escrow_dashboard_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::io;
/// use std::path::PathBuf;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(&[PathBuf::from("transactions.csv")], &ReportConfig::default(), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl SyncProcessingStrategy {
    fn load<T: FromCsvRow>(&self, inputs: &[PathBuf]) -> Result<Vec<T>, DashboardError> {
        let mut records = Vec::new();

        for path in inputs {
            let reader = SyncReader::<T>::new(path)?;
            let before = records.len();

            for result in reader {
                match result {
                    Ok(record) => records.push(record),
                    Err(e) if e.is_recoverable() => {
                        warn!(source = %path.display(), error = %e, "skipping malformed row")
                    }
                    Err(e) => return Err(e),
                }
            }

            info!(
                source = %path.display(),
                records = records.len() - before,
                "loaded source"
            );
        }

        Ok(records)
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn load_transactions(&self, inputs: &[PathBuf]) -> Result<Vec<Transaction>, DashboardError> {
        self.load(inputs)
    }

    fn load_disputes(&self, inputs: &[PathBuf]) -> Result<Vec<Dispute>, DashboardError> {
        self.load(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{OutputMode, RecordKind, ReportConfig};
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
    fn test_sync_strategy_lists_transactions() {
        let file = create_temp_csv(&format!(
            "{}TXN1,1.5,ETH,Alice B.,Bob C.,Disputed\nTXN2,500,USDC,Charlie D.,Diana E.,Pending Review\n",
            HEADER
        ));

        let mut output = Vec::new();
        let result = SyncProcessingStrategy.process(
            &[file.path().to_path_buf()],
            &ReportConfig::default(),
            &mut output,
        );
        assert!(result.is_ok());

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,amount,currency,buyer,seller,status,active,route\n\
             TXN2,500,USDC,Charlie D.,Diana E.,Pending Review,true,/transactions/TXN2\n\
             TXN1,1.5,ETH,Alice B.,Bob C.,Disputed,false,/disputes/TXN1\n"
        );
    }

    #[test]
    fn test_sync_strategy_concatenates_inputs_in_order() {
        let first = create_temp_csv(&format!("{}TXN1,1,ETH,A,B,Fulfilled\n", HEADER));
        let second = create_temp_csv(&format!("{}TXN2,2,ETH,C,D,Fulfilled\n", HEADER));

        let records = SyncProcessingStrategy
            .load_transactions(&[first.path().to_path_buf(), second.path().to_path_buf()])
            .unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["TXN1", "TXN2"]);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let valid = create_temp_csv(&format!("{}TXN1,1,ETH,A,B,Fulfilled\n", HEADER));
        let mut output = Vec::new();

        let result = SyncProcessingStrategy.process(
            &[valid.path().to_path_buf(), PathBuf::from("nonexistent.csv")],
            &ReportConfig::default(),
            &mut output,
        );
        assert!(matches!(result, Err(DashboardError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_continues_on_malformed_record() {
        let file = create_temp_csv(&format!(
            "{}TXN1,1,ETH,A,B,Fulfilled\nTXN2,invalid,ETH,A,B,Fulfilled\nTXN3,3,ETH,A,B,Fulfilled\n",
            HEADER
        ));

        let records = SyncProcessingStrategy
            .load_transactions(&[file.path().to_path_buf()])
            .unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["TXN1", "TXN3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_strategy_stops_on_read_failure() {
        let valid = create_temp_csv(&format!("{}TXN1,1,ETH,A,B,Fulfilled\n", HEADER));
        let unreadable = tempfile::tempdir().expect("Failed to create temp dir");

        let result = SyncProcessingStrategy
            .load_transactions(&[valid.path().to_path_buf(), unreadable.path().to_path_buf()]);
        assert!(matches!(result, Err(DashboardError::IoError { .. })));
    }

    #[test]
    fn test_sync_strategy_dispute_options() {
        let file = create_temp_csv(
            "id,amount,currency,buyer,buyer_address,seller,seller_address,status,priority,decision_expected,last_action,last_action_by\n\
             TXN78898,2.0,ETH,Ivan J.,,Kelly L.,,Under Review,High Priority,Within 3 days,Evidence submitted,buyer\n\
             TXN78895,750,USDC,Mike P.,,Sarah Q.,,Awaiting Response,Medium Priority,Within 5 days,Dispute filed,seller\n",
        );

        let report = ReportConfig {
            kind: RecordKind::Dispute,
            mode: OutputMode::Options,
            ..ReportConfig::default()
        };
        let mut output = Vec::new();
        SyncProcessingStrategy
            .process(&[file.path().to_path_buf()], &report, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "field,value\n\
             status,All\nstatus,Under Review\nstatus,Awaiting Response\n\
             currency,All\ncurrency,ETH\ncurrency,USDC\n\
             amount,All\namount,2\namount,750\n"
        );
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
