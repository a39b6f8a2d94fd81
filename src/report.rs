//! Report configuration
//!
//! Collects everything needed to turn a loaded record listing into CSV
//! output: which status table applies, the filter and ordering settings, the
//! router and the output shape.

use crate::core::{
    DashboardPipeline, EscrowRecord, FilterCriteria, Router, SortOptions, StatusClassifier,
};
use crate::io::{write_groups_csv, write_options_csv, write_records_csv};
use crate::types::DashboardError;
use clap::ValueEnum;
use std::io::Write;

/// Kind of record listing being processed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Escrow transactions
    #[default]
    Transaction,
    /// Arbitration disputes
    Dispute,
}

impl RecordKind {
    /// Status table used to classify records of this kind
    pub fn classifier(self) -> StatusClassifier {
        match self {
            RecordKind::Transaction => StatusClassifier::transactions(),
            RecordKind::Dispute => StatusClassifier::disputes(),
        }
    }
}

/// Shape of the CSV written to the output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Filtered records in dashboard order
    #[default]
    List,
    /// Filtered records bucketed by status
    Grouped,
    /// Filter dropdown choices over all loaded records
    Options,
}

/// Settings for one report run
#[derive(Clone, Debug, Default)]
pub struct ReportConfig {
    pub kind: RecordKind,
    pub criteria: FilterCriteria,
    pub sort_options: SortOptions,
    pub router: Router,
    pub mode: OutputMode,
}

impl ReportConfig {
    /// Build the pipeline described by this configuration
    pub fn pipeline(&self) -> DashboardPipeline {
        DashboardPipeline::new(self.kind.classifier())
            .with_criteria(self.criteria.clone())
            .with_sort_options(self.sort_options)
            .with_router(self.router.clone())
    }

    /// Run the pipeline over `records` and write the selected output
    pub fn render<R: EscrowRecord>(
        &self,
        records: &[R],
        output: &mut dyn Write,
    ) -> Result<(), DashboardError> {
        let pipeline = self.pipeline();

        match self.mode {
            OutputMode::List => write_records_csv(&pipeline.run(records), output),
            OutputMode::Grouped => write_groups_csv(&pipeline.run_grouped(records), output),
            OutputMode::Options => write_options_csv(&pipeline.options(records), output),
        }
    }
}
