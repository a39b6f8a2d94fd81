//! CSV format handling for dashboard records and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserializing transaction and dispute listings
//! - Conversion from CSV rows to domain types ([`FromCsvRow`])
//! - Report serialization (record list, grouped list, filter options)
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Input formats
//!
//! ```text
//! id,amount,currency,buyer,seller,status
//! id,amount,currency,buyer,buyer_address,seller,seller_address,status,priority,decision_expected,last_action,last_action_by
//! ```

use crate::core::{ClassifiedRecord, EscrowRecord, FilterOptions, StatusGroups};
use crate::types::{
    parse_decimal, Amount, DashboardError, Dispute, LastAction, LastActionKind, Party, PartyRole,
    Priority, Transaction,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;

/// Header of the record list report
pub const RECORD_HEADER: [&str; 8] = [
    "id", "amount", "currency", "buyer", "seller", "status", "active", "route",
];

/// A domain record that can be built from one CSV row
pub trait FromCsvRow: Sized {
    /// Deserialized row shape
    type Row: DeserializeOwned;

    /// Validate and convert a deserialized row
    fn from_csv_row(row: Self::Row) -> Result<Self, DashboardError>;
}

/// CSV row of a transaction listing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransactionRow {
    pub id: String,
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub seller: String,
    pub status: String,
}

/// CSV row of a dispute listing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvDisputeRow {
    pub id: String,
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub buyer_address: Option<String>,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub seller_address: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub decision_expected: Option<String>,
    #[serde(default)]
    pub last_action: Option<String>,
    #[serde(default)]
    pub last_action_by: Option<String>,
}

fn required(value: String, field: &str) -> Result<String, DashboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DashboardError::missing_field(field, None))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn convert_amount(value: &str, currency: String, id: &str) -> Result<Amount, DashboardError> {
    let value = parse_decimal(value).ok_or_else(|| DashboardError::invalid_amount(value, id))?;
    let currency = required(currency, "currency")?;
    Ok(Amount::new(value, currency))
}

/// Convert a transaction row
///
/// `id`, `amount`, `currency` and `status` are required; the status label is
/// kept verbatim even when the dashboard does not know it.
pub fn convert_transaction_row(row: CsvTransactionRow) -> Result<Transaction, DashboardError> {
    let id = required(row.id, "id")?;
    let amount = convert_amount(&row.amount, row.currency, &id)?;
    let status = required(row.status, "status")?;

    Ok(Transaction::new(
        id,
        amount,
        row.buyer.trim(),
        row.seller.trim(),
        status,
    ))
}

/// Convert a dispute row
///
/// `last_action` and `last_action_by` must be given together.
pub fn convert_dispute_row(row: CsvDisputeRow) -> Result<Dispute, DashboardError> {
    let id = required(row.id, "id")?;
    let amount = convert_amount(&row.amount, row.currency, &id)?;
    let status = required(row.status, "status")?;

    let priority = match optional(row.priority) {
        Some(label) => Some(
            Priority::parse(&label).ok_or_else(|| DashboardError::invalid_priority(&label, &id))?,
        ),
        None => None,
    };

    let last_action = match (optional(row.last_action), optional(row.last_action_by)) {
        (None, None) => None,
        (Some(kind), Some(by)) => {
            let invalid = || DashboardError::invalid_last_action(&format!("{} by {}", kind, by), &id);
            Some(LastAction {
                kind: LastActionKind::parse(&kind).ok_or_else(invalid)?,
                by: PartyRole::parse(&by).ok_or_else(invalid)?,
            })
        }
        (Some(kind), None) => return Err(DashboardError::invalid_last_action(&kind, &id)),
        (None, Some(by)) => return Err(DashboardError::invalid_last_action(&by, &id)),
    };

    let mut dispute = Dispute::new(
        id,
        amount,
        Party::new(row.buyer.trim(), optional(row.buyer_address)),
        Party::new(row.seller.trim(), optional(row.seller_address)),
        status,
    );
    dispute.priority = priority;
    dispute.decision_expected = optional(row.decision_expected);
    dispute.last_action = last_action;
    Ok(dispute)
}

impl FromCsvRow for Transaction {
    type Row = CsvTransactionRow;

    fn from_csv_row(row: Self::Row) -> Result<Self, DashboardError> {
        convert_transaction_row(row)
    }
}

impl FromCsvRow for Dispute {
    type Row = CsvDisputeRow;

    fn from_csv_row(row: Self::Row) -> Result<Self, DashboardError> {
        convert_dispute_row(row)
    }
}

fn record_fields<R: EscrowRecord>(row: &ClassifiedRecord<'_, R>) -> [String; 8] {
    let amount = row.amount();
    [
        row.id().to_string(),
        amount.filter_key(),
        amount.currency.clone(),
        row.buyer_name().to_string(),
        row.seller_name().to_string(),
        row.status().to_string(),
        row.info.is_active.to_string(),
        row.route.to_string(),
    ]
}

/// Write the ordered record list
///
/// Columns: id, amount, currency, buyer, seller, status, active, route.
/// Rows are written in the order given.
pub fn write_records_csv<R: EscrowRecord>(
    rows: &[ClassifiedRecord<'_, R>],
    output: &mut dyn Write,
) -> Result<(), DashboardError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(RECORD_HEADER)
        .map_err(|e| DashboardError::output(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        writer
            .write_record(record_fields(row))
            .map_err(|e| DashboardError::output(format!("Failed to write record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| DashboardError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write records bucket by bucket, with a leading `group` column
pub fn write_groups_csv<R: EscrowRecord>(
    groups: &StatusGroups<ClassifiedRecord<'_, R>>,
    output: &mut dyn Write,
) -> Result<(), DashboardError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut header = vec!["group"];
    header.extend(RECORD_HEADER);
    writer
        .write_record(&header)
        .map_err(|e| DashboardError::output(format!("Failed to write CSV header: {}", e)))?;

    for (status, rows) in groups.iter() {
        for row in rows {
            let fields = record_fields(row);
            writer
                .write_record(std::iter::once(status).chain(fields.iter().map(String::as_str)))
                .map_err(|e| DashboardError::output(format!("Failed to write record: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| DashboardError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write filter dropdown options as `field,value` rows
pub fn write_options_csv(
    options: &FilterOptions,
    output: &mut dyn Write,
) -> Result<(), DashboardError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["field", "value"])
        .map_err(|e| DashboardError::output(format!("Failed to write CSV header: {}", e)))?;

    let sections = [
        ("status", &options.statuses),
        ("currency", &options.currencies),
        ("amount", &options.amounts),
    ];
    for (field, values) in sections {
        for value in values {
            writer
                .write_record([field, value.as_str()])
                .map_err(|e| DashboardError::output(format!("Failed to write option: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| DashboardError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
