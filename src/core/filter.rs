//! Record filtering
//!
//! A record passes the filter when it satisfies all four predicates:
//!
//! - **search**: the trimmed, lowercased term is empty or is a substring of
//!   the lowercased id, `#` + id, buyer name or seller name
//! - **status**: exact match on the status label
//! - **amount**: exact match on the amount's filter key (see
//!   [`Amount::filter_key`](crate::types::Amount::filter_key)), or a numeric
//!   comparison when [`AmountMatch::Numeric`] is selected
//! - **currency**: exact match on the currency symbol
//!
//! Facet filters set to [`ALL`] (or left empty) are skipped. Filtering never
//! reorders records.

use crate::core::traits::EscrowRecord;
use crate::types::parse_decimal;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Facet value that disables a filter
pub const ALL: &str = "All";

/// How the amount facet compares values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountMatch {
    /// Compare the rendered amount string with the filter text
    ///
    /// `"1.5"` matches a value of `1.50`, but `"1.50"` matches nothing.
    #[default]
    Literal,

    /// Parse the filter text and accept values within `tolerance` of it
    Numeric {
        /// Largest accepted absolute difference
        tolerance: Decimal,
    },
}

/// Filter settings chosen on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text search term
    pub search_term: String,

    /// Status label or [`ALL`]
    pub status_filter: String,

    /// Amount text or [`ALL`]
    pub amount_filter: String,

    /// Currency symbol or [`ALL`]
    pub currency_filter: String,

    /// Comparison used for `amount_filter`
    pub amount_match: AmountMatch,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            search_term: String::new(),
            status_filter: ALL.to_string(),
            amount_filter: ALL.to_string(),
            currency_filter: ALL.to_string(),
            amount_match: AmountMatch::Literal,
        }
    }
}

impl FilterCriteria {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_filter = status.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount_filter = amount.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency_filter = currency.into();
        self
    }

    pub fn with_amount_match(mut self, amount_match: AmountMatch) -> Self {
        self.amount_match = amount_match;
        self
    }

    /// True when every record would pass
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.trim().is_empty()
            && facet(&self.status_filter).is_none()
            && facet(&self.amount_filter).is_none()
            && facet(&self.currency_filter).is_none()
    }
}

/// Active facet value, or `None` when the facet is disabled
fn facet(value: &str) -> Option<&str> {
    if value == ALL || value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Compiled filter ready to test records
#[derive(Debug, Clone)]
pub struct TransactionFilter {
    criteria: FilterCriteria,
    /// Trimmed, lowercased search term
    needle: String,
    /// Parsed numeric amount target (numeric mode only)
    amount_target: Option<Decimal>,
}

impl TransactionFilter {
    pub fn new(criteria: FilterCriteria) -> Self {
        let needle = criteria.search_term.trim().to_lowercase();
        let amount_target = match criteria.amount_match {
            AmountMatch::Numeric { .. } => facet(&criteria.amount_filter).and_then(parse_decimal),
            AmountMatch::Literal => None,
        };

        TransactionFilter {
            criteria,
            needle,
            amount_target,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Whether a single record passes every predicate
    pub fn matches<R: EscrowRecord>(&self, record: &R) -> bool {
        self.matches_search(record)
            && self.matches_status(record)
            && self.matches_amount(record)
            && self.matches_currency(record)
    }

    /// Keep matching records, in input order
    pub fn apply<'a, R: EscrowRecord>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|record| self.matches(*record)).collect()
    }

    fn matches_search<R: EscrowRecord>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        let id = record.id().to_lowercase();
        let candidates = [
            format!("#{}", id),
            id,
            record.buyer_name().to_lowercase(),
            record.seller_name().to_lowercase(),
        ];
        candidates
            .iter()
            .any(|candidate| candidate.contains(&self.needle))
    }

    fn matches_status<R: EscrowRecord>(&self, record: &R) -> bool {
        facet(&self.criteria.status_filter).is_none_or(|status| record.status() == status)
    }

    fn matches_amount<R: EscrowRecord>(&self, record: &R) -> bool {
        let Some(filter) = facet(&self.criteria.amount_filter) else {
            return true;
        };

        match self.criteria.amount_match {
            AmountMatch::Literal => record.amount().filter_key() == filter,
            AmountMatch::Numeric { tolerance } => self
                .amount_target
                .is_some_and(|target| (record.amount().value - target).abs() <= tolerance),
        }
    }

    fn matches_currency<R: EscrowRecord>(&self, record: &R) -> bool {
        facet(&self.criteria.currency_filter)
            .is_none_or(|currency| record.amount().currency == currency)
    }
}

/// Filter `records` by `criteria`, preserving order
pub fn filter<'a, R: EscrowRecord>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
    TransactionFilter::new(criteria.clone()).apply(records)
}

/// Choices offered by the dashboard's filter dropdowns
///
/// Each list starts with [`ALL`] followed by the distinct values found in
/// the full population, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub currencies: Vec<String>,
    pub amounts: Vec<String>,
}

impl FilterOptions {
    pub fn from_records<R: EscrowRecord>(records: &[R]) -> Self {
        FilterOptions {
            statuses: distinct_with_all(records.iter().map(|r| r.status().to_string())),
            currencies: distinct_with_all(records.iter().map(|r| r.amount().currency.clone())),
            amounts: distinct_with_all(records.iter().map(|r| r.amount().filter_key())),
        }
    }
}

fn distinct_with_all(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL.to_string()];
    for value in values {
        if seen.insert(value.clone()) {
            options.push(value);
        }
    }
    options
}
