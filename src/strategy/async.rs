//! Asynchronous multi-source processing strategy
//!
//! Loads every input concurrently on a multi-threaded tokio runtime, then
//! hands the concatenated listing to the shared report stage.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── LoadConfig (batch_size, max_concurrent_sources)
//!     ├── Semaphore (bounds loads in flight)
//!     └── one task per source
//!             └── AsyncReader (batch CSV reading over tokio::fs::File)
//! ```
//!
//! # Fault isolation
//!
//! Each source is loaded by its own task and returns its own vector; there is
//! no shared mutable state. A source that cannot be read is logged and
//! contributes no records. The run only fails when no source could be read
//! at all. Results are joined in input order, so for readable inputs the
//! output is identical to the synchronous strategy.

use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::FromCsvRow;
use crate::strategy::ProcessingStrategy;
use crate::types::{DashboardError, Dispute, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info, warn};

/// Configuration for concurrent loading
///
/// Both values are always non-zero; [`LoadConfig::new`] is the only way to
/// set them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadConfig {
    batch_size: usize,
    max_concurrent_sources: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_sources: num_cpus::get(),
        }
    }
}

impl LoadConfig {
    /// Create a new LoadConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_sources: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_sources = if max_concurrent_sources == 0 {
            warn!(
                max_concurrent_sources,
                default = default.max_concurrent_sources,
                "invalid concurrency limit, using default"
            );
            default.max_concurrent_sources
        } else {
            max_concurrent_sources
        };

        Self {
            batch_size,
            max_concurrent_sources,
        }
    }

    /// Number of records read from a source per step
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Maximum number of sources loading concurrently
    pub fn max_concurrent_sources(&self) -> usize {
        self.max_concurrent_sources
    }
}

/// Asynchronous multi-source processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: LoadConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    fn load<T>(&self, inputs: &[PathBuf]) -> Result<Vec<T>, DashboardError>
    where
        T: FromCsvRow + Send + 'static,
        T::Row: Send,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_sources)
            .build()
            .map_err(|e| DashboardError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let batch_size = self.config.batch_size;
        let results = runtime.block_on(async {
            let permits = Arc::new(Semaphore::new(self.config.max_concurrent_sources));

            let mut tasks = Vec::with_capacity(inputs.len());
            for path in inputs.iter().cloned() {
                let permits = Arc::clone(&permits);
                let task = tokio::spawn(async move {
                    match permits.acquire_owned().await {
                        Ok(_permit) => load_source::<T>(&path, batch_size).await,
                        Err(e) => Err(DashboardError::IoError {
                            message: format!("Load slot unavailable: {}", e),
                        }),
                    }
                });
                tasks.push(task);
            }

            // Awaiting in spawn order keeps results aligned with inputs
            let mut results = Vec::with_capacity(tasks.len());
            for task in tasks {
                results.push(task.await);
            }
            results
        });

        let mut records = Vec::new();
        let mut first_error = None;
        let mut loaded_sources = 0;

        for (path, joined) in inputs.iter().zip(results) {
            let result = joined.unwrap_or_else(|e| {
                Err(DashboardError::IoError {
                    message: format!("Load task failed: {}", e),
                })
            });

            match result {
                Ok(mut batch) => {
                    info!(source = %path.display(), records = batch.len(), "loaded source");
                    loaded_sources += 1;
                    records.append(&mut batch);
                }
                Err(e) => {
                    warn!(source = %path.display(), error = %e, "skipping unreadable source");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if loaded_sources == 0 => Err(e),
            _ => Ok(records),
        }
    }
}

/// Drain one CSV source batch by batch
async fn load_source<T: FromCsvRow>(
    path: &Path,
    batch_size: usize,
) -> Result<Vec<T>, DashboardError>
where
    T::Row: Send,
{
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| DashboardError::open_failed(path, e))?;

    let mut reader = AsyncReader::<_, T>::new(file.compat());
    let mut records = Vec::new();

    loop {
        let batch = reader.read_batch(batch_size).await?;
        if batch.is_empty() {
            break;
        }
        debug!(source = %path.display(), batch = batch.len(), "read batch");
        records.extend(batch);
    }

    Ok(records)
}

impl ProcessingStrategy for AsyncProcessingStrategy {
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
    use crate::report::ReportConfig;
    use crate::strategy::SyncProcessingStrategy;
    use rstest::rstest;
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

    fn ids(records: &[Transaction]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[rstest]
    #[case::defaults(1000, 4, 1000, 4)]
    #[case::zero_batch_size(0, 4, 1000, 4)]
    #[case::zero_concurrency(500, 0, 500, num_cpus::get())]
    fn test_load_config_new(
        #[case] batch_size: usize,
        #[case] max_concurrent: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = LoadConfig::new(batch_size, max_concurrent);
        assert_eq!(config.batch_size(), expected_batch_size);
        assert_eq!(config.max_concurrent_sources(), expected_max_concurrent);
    }

    #[test]
    fn test_async_strategy_with_zero_limits_still_loads() {
        let file = create_temp_csv(&format!("{}TXN1,1,ETH,A,B,Fulfilled\n", HEADER));

        let strategy = AsyncProcessingStrategy::new(LoadConfig::new(0, 0));
        assert_eq!(strategy.config(), &LoadConfig::default());

        let records = strategy
            .load_transactions(&[file.path().to_path_buf()])
            .unwrap();
        assert_eq!(ids(&records), vec!["TXN1"]);
    }

    #[test]
    fn test_async_strategy_keeps_input_order_across_batches() {
        let first = create_temp_csv(&format!(
            "{}TXN1,1,ETH,A,B,Fulfilled\nTXN2,2,ETH,A,B,Fulfilled\nTXN3,3,ETH,A,B,Fulfilled\n",
            HEADER
        ));
        let second = create_temp_csv(&format!("{}TXN4,4,BTC,C,D,Refunded\n", HEADER));

        let strategy = AsyncProcessingStrategy::new(LoadConfig::new(2, 2));
        let records = strategy
            .load_transactions(&[first.path().to_path_buf(), second.path().to_path_buf()])
            .unwrap();

        assert_eq!(ids(&records), vec!["TXN1", "TXN2", "TXN3", "TXN4"]);
    }

    #[test]
    fn test_async_strategy_skips_missing_source() {
        let valid = create_temp_csv(&format!("{}TXN1,1,ETH,A,B,Fulfilled\n", HEADER));

        let strategy = AsyncProcessingStrategy::new(LoadConfig::default());
        let records = strategy
            .load_transactions(&[PathBuf::from("nonexistent.csv"), valid.path().to_path_buf()])
            .unwrap();

        assert_eq!(ids(&records), vec!["TXN1"]);
    }

    #[test]
    fn test_async_strategy_fails_when_every_source_fails() {
        let strategy = AsyncProcessingStrategy::new(LoadConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(
            &[PathBuf::from("missing-a.csv"), PathBuf::from("missing-b.csv")],
            &ReportConfig::default(),
            &mut output,
        );
        assert_eq!(result, Err(DashboardError::file_not_found("missing-a.csv")));
        assert!(output.is_empty());
    }

    #[test]
    fn test_async_strategy_skips_malformed_rows() {
        let file = create_temp_csv(&format!(
            "{}TXN1,1,ETH,A,B,Fulfilled\nTXN2,invalid,ETH,A,B,Fulfilled\nTXN3,3,ETH,A,B,\nTXN4,4,ETH,A,B,Refunded\n",
            HEADER
        ));

        let strategy = AsyncProcessingStrategy::new(LoadConfig::default());
        let records = strategy
            .load_transactions(&[file.path().to_path_buf()])
            .unwrap();

        assert_eq!(ids(&records), vec!["TXN1", "TXN4"]);
    }

    #[test]
    fn test_async_strategy_matches_sync_output() {
        let file = create_temp_csv(&format!(
            "{}TXN1,1.50,ETH,Alice B.,Bob C.,Disputed\n\
             TXN2,500,USDC,Charlie D.,Diana E.,Funds Locked\n\
             TXN3,0.00000015,BTC,Eve F.,Frank G.,On Hold\n\
             TXN78901,2.0,ETH,Alice B.,Frank G.,Pending Review\n",
            HEADER
        ));
        let inputs = [file.path().to_path_buf()];
        let report = ReportConfig::default();

        let mut sync_output = Vec::new();
        SyncProcessingStrategy
            .process(&inputs, &report, &mut sync_output)
            .unwrap();

        let mut async_output = Vec::new();
        AsyncProcessingStrategy::new(LoadConfig::new(1, 1))
            .process(&inputs, &report, &mut async_output)
            .unwrap();

        assert_eq!(async_output, sync_output);
    }

    #[test]
    fn test_async_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AsyncProcessingStrategy>();
    }
}
