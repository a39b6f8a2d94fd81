//! Processing strategy module
//!
//! This module defines the Strategy pattern for the complete report pipeline:
//! loading record listings from CSV sources, then filtering, ordering and
//! writing them. Loading is what differs between strategies (sequential vs.
//! concurrent multi-source); the report stage is shared.

use crate::cli::StrategyType;
use crate::report::{RecordKind, ReportConfig};
use crate::types::{DashboardError, Dispute, Transaction};
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, LoadConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete report pipelines
///
/// Implementations decide how record listings are loaded from their sources.
/// Malformed rows are logged and skipped by every implementation; what
/// happens when a whole source cannot be read is strategy specific.
pub trait ProcessingStrategy: Send + Sync {
    /// Load transaction listings from every input, concatenated in input order
    fn load_transactions(&self, inputs: &[PathBuf]) -> Result<Vec<Transaction>, DashboardError>;

    /// Load dispute listings from every input, concatenated in input order
    fn load_disputes(&self, inputs: &[PathBuf]) -> Result<Vec<Dispute>, DashboardError>;

    /// Load records from `inputs` and write the configured report to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails fatally or the output cannot be
    /// written.
    fn process(
        &self,
        inputs: &[PathBuf],
        report: &ReportConfig,
        output: &mut dyn Write,
    ) -> Result<(), DashboardError> {
        match report.kind {
            RecordKind::Transaction => report.render(&self.load_transactions(inputs)?, output),
            RecordKind::Dispute => report.render(&self.load_disputes(inputs)?, output),
        }
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional loading configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<LoadConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
