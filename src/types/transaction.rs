//! Transaction-related types for the escrow dashboard
//!
//! This module defines the escrow transaction record and the closed set of
//! statuses the dashboard knows how to classify.

use super::amount::Amount;
use std::fmt;

/// Transaction identifier (e.g. `TXN78901`)
pub type TransactionId = String;

/// Known escrow transaction statuses
///
/// Variants are declared in dashboard priority order: work in progress
/// first, terminal outcomes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscrowStatus {
    /// Buyer funds are held by the escrow contract
    FundsLocked,

    /// Delivery has been reported and awaits confirmation
    PendingReview,

    /// Release conditions were met and the seller was paid
    Fulfilled,

    /// One of the parties opened a dispute
    ///
    /// Treated as a closed outcome on the dashboard even though the
    /// arbitration itself may still be running.
    Disputed,

    /// Funds were returned to the buyer
    Refunded,
}

impl EscrowStatus {
    /// All statuses in priority order
    pub const PRIORITY_ORDER: [EscrowStatus; 5] = [
        EscrowStatus::FundsLocked,
        EscrowStatus::PendingReview,
        EscrowStatus::Fulfilled,
        EscrowStatus::Disputed,
        EscrowStatus::Refunded,
    ];

    /// Position in [`PRIORITY_ORDER`](Self::PRIORITY_ORDER), 0 sorts first
    pub fn rank(&self) -> usize {
        Self::PRIORITY_ORDER
            .iter()
            .position(|status| status == self)
            .unwrap_or(Self::PRIORITY_ORDER.len())
    }

    /// Exact-match lookup of a status label
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Funds Locked" => Some(EscrowStatus::FundsLocked),
            "Pending Review" => Some(EscrowStatus::PendingReview),
            "Fulfilled" => Some(EscrowStatus::Fulfilled),
            "Disputed" => Some(EscrowStatus::Disputed),
            "Refunded" => Some(EscrowStatus::Refunded),
            _ => None,
        }
    }

    /// The label as it appears in records
    pub fn as_str(&self) -> &'static str {
        match self {
            EscrowStatus::FundsLocked => "Funds Locked",
            EscrowStatus::PendingReview => "Pending Review",
            EscrowStatus::Fulfilled => "Fulfilled",
            EscrowStatus::Disputed => "Disputed",
            EscrowStatus::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escrow transaction as listed on the dashboard
///
/// The status is kept as the raw label so that records with statuses the
/// dashboard does not know still flow through filtering and grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Unique identifier, used as the lookup and routing key
    pub id: TransactionId,

    /// Escrowed amount
    pub amount: Amount,

    /// Buyer display name
    pub buyer: String,

    /// Seller display name
    pub seller: String,

    /// Status label (normally one of [`EscrowStatus`])
    pub status: String,
}

impl Transaction {
    /// Create a transaction record
    pub fn new(
        id: impl Into<TransactionId>,
        amount: Amount,
        buyer: impl Into<String>,
        seller: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Transaction {
            id: id.into(),
            amount,
            buyer: buyer.into(),
            seller: seller.into(),
            status: status.into(),
        }
    }

    /// The status as a known variant, if it is one
    pub fn known_status(&self) -> Option<EscrowStatus> {
        EscrowStatus::parse(&self.status)
    }
}
