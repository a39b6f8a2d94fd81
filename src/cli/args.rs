use crate::core::{
    AmountMatch, FilterCriteria, Router, SortOptions, UnknownStatusOrder, ALL,
    DEFAULT_DASHBOARD_SENTINEL,
};
use crate::report::{OutputMode, RecordKind, ReportConfig};
use crate::strategy::LoadConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Filter, order and route escrow dashboard listings
#[derive(Parser, Debug)]
#[command(name = "escrow-dashboard")]
#[command(about = "Filter, order and route escrow dashboard listings", long_about = None)]
pub struct CliArgs {
    /// Input CSV files, read in the order given
    #[arg(value_name = "INPUT", required = true, help = "Paths to the input CSV files")]
    pub inputs: Vec<PathBuf>,

    /// Kind of listing contained in the inputs
    #[arg(long = "kind", value_name = "KIND", default_value = "transaction")]
    pub kind: RecordKind,

    /// Free-text search over id, buyer and seller
    #[arg(long = "search", value_name = "TERM", default_value = "")]
    pub search: String,

    /// Status facet
    #[arg(long = "status", value_name = "STATUS", default_value = ALL)]
    pub status: String,

    /// Amount facet
    #[arg(long = "amount", value_name = "AMOUNT", default_value = ALL)]
    pub amount: String,

    /// Currency facet
    #[arg(long = "currency", value_name = "CURRENCY", default_value = ALL)]
    pub currency: String,

    /// How the amount facet compares values
    #[arg(
        long = "amount-match",
        value_name = "MODE",
        default_value = "literal",
        help = "Amount comparison: 'literal' string match or 'numeric' with --tolerance"
    )]
    pub amount_match: AmountMatchType,

    /// Largest accepted difference for numeric amount matching
    #[arg(long = "tolerance", value_name = "DECIMAL", default_value = "0")]
    pub tolerance: Decimal,

    /// Place unrecognised statuses after known ones
    #[arg(long = "unknown-last")]
    pub unknown_last: bool,

    /// Report shape
    #[arg(long = "output", value_name = "MODE", default_value = "list")]
    pub output: OutputMode,

    /// Record id that routes back to the dashboard
    #[arg(long = "sentinel-id", value_name = "ID", default_value = DEFAULT_DASHBOARD_SENTINEL)]
    pub sentinel_id: String,

    /// Loading strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Loading strategy: 'sync' for sequential or 'async' for concurrent sources"
    )]
    pub strategy: StrategyType,

    /// Number of records read per step (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records read per step (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of sources loading concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of sources loading concurrently (default: CPU cores)"
    )]
    pub max_concurrent_sources: Option<usize>,
}

/// Available loading strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Amount comparison modes selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AmountMatchType {
    Literal,
    Numeric,
}

impl CliArgs {
    /// Create a LoadConfig from CLI arguments
    ///
    /// Zero values are replaced with defaults by [`LoadConfig::new`].
    pub fn to_load_config(&self) -> LoadConfig {
        if self.batch_size.is_some() || self.max_concurrent_sources.is_some() {
            let default = LoadConfig::default();
            LoadConfig::new(
                self.batch_size.unwrap_or(default.batch_size()),
                self.max_concurrent_sources
                    .unwrap_or(default.max_concurrent_sources()),
            )
        } else {
            LoadConfig::default()
        }
    }

    /// Create the report settings from CLI arguments
    pub fn to_report_config(&self) -> ReportConfig {
        let amount_match = match self.amount_match {
            AmountMatchType::Literal => AmountMatch::Literal,
            AmountMatchType::Numeric => AmountMatch::Numeric {
                tolerance: self.tolerance.abs(),
            },
        };

        let unknown_status_order = if self.unknown_last {
            UnknownStatusOrder::AfterKnown
        } else {
            UnknownStatusOrder::BeforeKnown
        };

        ReportConfig {
            kind: self.kind,
            criteria: FilterCriteria::default()
                .with_search(self.search.as_str())
                .with_status(self.status.as_str())
                .with_amount(self.amount.as_str())
                .with_currency(self.currency.as_str())
                .with_amount_match(amount_match),
            sort_options: SortOptions {
                unknown_status_order,
            },
            router: Router::with_sentinel(self.sentinel_id.as_str()),
            mode: self.output,
        }
    }
}
