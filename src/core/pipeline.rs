//! Dashboard pipeline
//!
//! Orchestrates the core stages over one record listing:
//!
//! ```text
//! records ─► TransactionFilter ─► TransactionSorter ─► (group) ─► rows
//!                                        │
//!                               StatusClassifier / Router annotate each row
//! ```
//!
//! The pipeline never mutates or copies the input records: every output row
//! borrows its record and carries the classification and route computed for
//! it.

use crate::core::classifier::{StatusClassifier, StatusInfo};
use crate::core::filter::{FilterCriteria, FilterOptions, TransactionFilter};
use crate::core::router::{Route, Router};
use crate::core::sorter::{SortOptions, StatusGroups, TransactionSorter};
use crate::core::traits::EscrowRecord;
use crate::types::Amount;
use tracing::debug;

/// A record together with its display metadata and destination
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord<'a, R> {
    pub record: &'a R,
    pub info: StatusInfo,
    pub route: Route,
}

impl<R: EscrowRecord> EscrowRecord for ClassifiedRecord<'_, R> {
    fn id(&self) -> &str {
        self.record.id()
    }

    fn status(&self) -> &str {
        self.record.status()
    }

    fn amount(&self) -> &Amount {
        self.record.amount()
    }

    fn buyer_name(&self) -> &str {
        self.record.buyer_name()
    }

    fn seller_name(&self) -> &str {
        self.record.seller_name()
    }
}

/// Filter, order, classify and route a record listing
#[derive(Debug, Clone)]
pub struct DashboardPipeline {
    classifier: StatusClassifier,
    filter: TransactionFilter,
    sorter: TransactionSorter,
    router: Router,
}

impl DashboardPipeline {
    /// Pipeline with default criteria, ordering and routing
    pub fn new(classifier: StatusClassifier) -> Self {
        DashboardPipeline {
            classifier,
            filter: TransactionFilter::new(FilterCriteria::default()),
            sorter: TransactionSorter::new(classifier, SortOptions::default()),
            router: Router::default(),
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.filter = TransactionFilter::new(criteria);
        self
    }

    pub fn with_sort_options(mut self, options: SortOptions) -> Self {
        self.sorter = TransactionSorter::new(self.classifier, options);
        self
    }

    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filter.criteria()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Attach classification and route to a single record
    pub fn annotate<'a, R: EscrowRecord>(&self, record: &'a R) -> ClassifiedRecord<'a, R> {
        ClassifiedRecord {
            record,
            info: self.classifier.classify(record.status()),
            route: self.router.route_for(record),
        }
    }

    /// Filtered records in dashboard order
    pub fn run<'a, R: EscrowRecord>(&self, records: &'a [R]) -> Vec<ClassifiedRecord<'a, R>> {
        let matched = self.filter.apply(records);
        debug!(
            total = records.len(),
            matched = matched.len(),
            "filtered records"
        );

        self.sorter
            .sort(matched)
            .into_iter()
            .map(|record| self.annotate(record))
            .collect()
    }

    /// Filtered records in dashboard order, bucketed by status
    pub fn run_grouped<'a, R: EscrowRecord>(
        &self,
        records: &'a [R],
    ) -> StatusGroups<ClassifiedRecord<'a, R>> {
        let groups: StatusGroups<_> = self.run(records).into_iter().collect();
        debug!(groups = groups.len(), "grouped records by status");
        groups
    }

    /// Dropdown choices over the unfiltered population
    pub fn options<R: EscrowRecord>(&self, records: &[R]) -> FilterOptions {
        FilterOptions::from_records(records)
    }
}

impl Default for DashboardPipeline {
    fn default() -> Self {
        Self::new(StatusClassifier::transactions())
    }
}
