//! Ordering and grouping of dashboard records
//!
//! # Ordering
//!
//! Records are ordered by two keys, and the sort is stable:
//!
//! 1. active records (per the [`StatusClassifier`]) before inactive ones
//! 2. position of the status in the classifier's priority list
//!
//! A status missing from the priority list ranks as `-1` by default, which
//! places it ahead of every known status inside its partition. Set
//! [`UnknownStatusOrder::AfterKnown`] to push such records to the end of
//! their partition instead.
//!
//! # Grouping
//!
//! [`group`] buckets records by their exact status label. Buckets keep the
//! order in which their status was first seen and records keep their input
//! order inside each bucket.

use crate::core::classifier::StatusClassifier;
use crate::core::traits::EscrowRecord;
use std::collections::HashMap;

/// Where statuses absent from the priority list are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatusOrder {
    /// Rank `-1`: ahead of known statuses within the same partition
    #[default]
    BeforeKnown,

    /// Behind every known status within the same partition
    AfterKnown,
}

/// Ordering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub unknown_status_order: UnknownStatusOrder,
}

/// Active-first, priority-second stable sorter
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionSorter {
    classifier: StatusClassifier,
    options: SortOptions,
}

impl TransactionSorter {
    pub fn new(classifier: StatusClassifier, options: SortOptions) -> Self {
        TransactionSorter {
            classifier,
            options,
        }
    }

    /// Sort key for a status label: inactive flag, then priority rank
    fn sort_key(&self, status: &str) -> (bool, i64) {
        let inactive = !self.classifier.is_active(status);
        let rank = match self.classifier.priority_index(status) {
            Some(index) => index as i64,
            None => match self.options.unknown_status_order {
                UnknownStatusOrder::BeforeKnown => -1,
                UnknownStatusOrder::AfterKnown => i64::MAX,
            },
        };
        (inactive, rank)
    }

    /// Return the records in dashboard order
    pub fn sort<R: EscrowRecord>(&self, mut records: Vec<R>) -> Vec<R> {
        // sort_by_key is stable
        records.sort_by_key(|record| self.sort_key(record.status()));
        records
    }
}

/// Sort with default options
pub fn sort<R: EscrowRecord>(records: Vec<R>, classifier: &StatusClassifier) -> Vec<R> {
    TransactionSorter::new(*classifier, SortOptions::default()).sort(records)
}

/// Records bucketed by status label, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroups<R> {
    buckets: Vec<(String, Vec<R>)>,
    index: HashMap<String, usize>,
}

impl<R> Default for StatusGroups<R> {
    fn default() -> Self {
        StatusGroups {
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R: EscrowRecord> StatusGroups<R> {
    /// Append a record to its status bucket, creating the bucket if needed
    pub fn push(&mut self, record: R) {
        let status = record.status();
        match self.index.get(status) {
            Some(&slot) => self.buckets[slot].1.push(record),
            None => {
                let status = status.to_string();
                self.index.insert(status.clone(), self.buckets.len());
                self.buckets.push((status, vec![record]));
            }
        }
    }
}

impl<R> StatusGroups<R> {
    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of records across all buckets
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    /// Records for one status label
    pub fn get(&self, status: &str) -> Option<&[R]> {
        self.index
            .get(status)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    /// Status labels in bucket order
    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(status, _)| status.as_str())
    }

    /// Buckets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.buckets
            .iter()
            .map(|(status, records)| (status.as_str(), records.as_slice()))
    }

    /// Concatenate all buckets back into one list
    pub fn into_flat(self) -> Vec<R> {
        self.buckets
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect()
    }
}

impl<R> IntoIterator for StatusGroups<R> {
    type Item = (String, Vec<R>);
    type IntoIter = std::vec::IntoIter<(String, Vec<R>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<R: EscrowRecord> FromIterator<R> for StatusGroups<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut groups = StatusGroups::default();
        for record in iter {
            groups.push(record);
        }
        groups
    }
}

/// Bucket records by exact status label
pub fn group<R: EscrowRecord>(records: impl IntoIterator<Item = R>) -> StatusGroups<R> {
    records.into_iter().collect()
}
