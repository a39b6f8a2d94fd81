//! Core dashboard logic
//!
//! This module contains the pure, synchronous stages of the dashboard:
//! - `traits` - The common record view shared by transactions and disputes
//! - `classifier` - Status to display metadata lookup
//! - `filter` - Search and facet filtering, filter dropdown options
//! - `sorter` - Active-first ordering and status grouping
//! - `router` - Click-through destination for a record
//! - `pipeline` - Orchestration of the stages above

pub mod classifier;
pub mod filter;
pub mod pipeline;
pub mod router;
pub mod sorter;
pub mod traits;

pub use classifier::{StatusClassifier, StatusInfo, StatusTable};
pub use filter::{filter, AmountMatch, FilterCriteria, FilterOptions, TransactionFilter, ALL};
pub use pipeline::{ClassifiedRecord, DashboardPipeline};
pub use router::{route_for, Route, Router, DEFAULT_DASHBOARD_SENTINEL};
pub use sorter::{group, sort, SortOptions, StatusGroups, TransactionSorter, UnknownStatusOrder};
pub use traits::EscrowRecord;
