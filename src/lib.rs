//! Escrow Dashboard Engine Library
//! # Overview
//!
//! This library classifies, filters, orders, groups and routes the record
//! listings shown on an escrow and dispute-arbitration dashboard. Records are
//! loaded from CSV through either a sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Dispute, Amount, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Pure dashboard stages:
//!   - [`core::classifier`] - Status display metadata and priority order
//!   - [`core::filter`] - Search and facet filtering
//!   - [`core::sorter`] - Active-first ordering and status grouping
//!   - [`core::router`] - Click-through destinations
//!   - [`core::pipeline`] - Orchestration of the stages
//! - [`io`] - CSV readers and report writers
//! - [`report`] - Report settings and rendering
//! - [`strategy`] - Sync and async loading strategies
//!
//! # Transaction Statuses
//!
//! In dashboard order:
//!
//! - **Funds Locked**: Buyer funds held in escrow (active)
//! - **Pending Review**: Awaiting confirmation (active)
//! - **Fulfilled**: Released to the seller
//! - **Disputed**: Handed to arbitration
//! - **Refunded**: Returned to the buyer
//!
//! # Example
//!
//! ```
//! use escrow_dashboard_engine::{Amount, DashboardPipeline, FilterCriteria, Transaction};
//! use rust_decimal::Decimal;
//!
//! let records = vec![
//!     Transaction::new("TXN1", Amount::new(Decimal::new(15, 1), "ETH"), "Alice B.", "Bob C.", "Fulfilled"),
//!     Transaction::new("TXN2", Amount::new(Decimal::new(500, 0), "USDC"), "Charlie D.", "Diana E.", "Funds Locked"),
//! ];
//!
//! let pipeline = DashboardPipeline::default()
//!     .with_criteria(FilterCriteria::default().with_search("bob"));
//! let rows = pipeline.run(&records);
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].route.to_string(), "/transactions/TXN1");
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod report;
pub mod strategy;
pub mod types;

pub use self::core::{
    AmountMatch, ClassifiedRecord, DashboardPipeline, EscrowRecord, FilterCriteria, FilterOptions,
    Route, Router, SortOptions, StatusClassifier, StatusGroups, StatusInfo, UnknownStatusOrder,
};
pub use io::{write_groups_csv, write_options_csv, write_records_csv};
pub use report::{OutputMode, RecordKind, ReportConfig};
pub use types::{
    Amount, DashboardError, Dispute, DisputeStatus, EscrowStatus, Party, Priority, Transaction,
    TransactionId,
};
