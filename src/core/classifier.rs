//! Status classification
//!
//! Maps a raw status label to the metadata the dashboard needs to render and
//! order a record: badge color, icon, whether the record is still in
//! progress, its priority rank and a tooltip.
//!
//! Two immutable tables exist, one for escrow transactions and one for
//! disputes. Lookup is an exact match on the label; anything else resolves to
//! the table's fallback entry, so classification never fails.
//!
//! | Transaction status | Active | Priority |
//! |--------------------|--------|----------|
//! | Funds Locked       | yes    | 0        |
//! | Pending Review     | yes    | 1        |
//! | Fulfilled          | no     | 2        |
//! | Disputed           | no     | 3        |
//! | Refunded           | no     | 4        |
//!
//! Unknown transaction statuses classify as `Refunded`.

use crate::types::{DisputeStatus, EscrowStatus};

/// Display metadata for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Badge color name
    pub display_color: &'static str,

    /// Icon name
    pub icon: &'static str,

    /// Whether the status represents work in progress
    pub is_active: bool,

    /// Rank among the table's statuses (0 sorts first)
    pub sort_priority: usize,

    /// Short description shown on hover
    pub tooltip: &'static str,
}

/// Which status vocabulary a classifier understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTable {
    Transactions,
    Disputes,
}

const UNKNOWN_DISPUTE: StatusInfo = StatusInfo {
    display_color: "gray",
    icon: "dot",
    is_active: false,
    sort_priority: DisputeStatus::PRIORITY_ORDER.len(),
    tooltip: "Unrecognised dispute status",
};

/// Status classifier over one of the fixed status tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusClassifier {
    table: StatusTable,
}

impl StatusClassifier {
    /// Classifier for escrow transaction statuses
    pub const fn transactions() -> Self {
        StatusClassifier {
            table: StatusTable::Transactions,
        }
    }

    /// Classifier for dispute statuses
    pub const fn disputes() -> Self {
        StatusClassifier {
            table: StatusTable::Disputes,
        }
    }

    pub const fn for_table(table: StatusTable) -> Self {
        StatusClassifier { table }
    }

    pub fn table(&self) -> StatusTable {
        self.table
    }

    /// Classify a status label, falling back for unknown labels
    pub fn classify(&self, status: &str) -> StatusInfo {
        match self.table {
            StatusTable::Transactions => {
                escrow_info(EscrowStatus::parse(status).unwrap_or(EscrowStatus::Refunded))
            }
            StatusTable::Disputes => DisputeStatus::parse(status)
                .map(dispute_info)
                .unwrap_or(UNKNOWN_DISPUTE),
        }
    }

    /// Shorthand for `classify(status).is_active`
    pub fn is_active(&self, status: &str) -> bool {
        self.classify(status).is_active
    }

    /// Position of the label in the fixed priority list, `None` if absent
    ///
    /// Unlike [`classify`](Self::classify) this does not fall back: callers
    /// decide where unknown labels go.
    pub fn priority_index(&self, status: &str) -> Option<usize> {
        match self.table {
            StatusTable::Transactions => EscrowStatus::parse(status).map(|s| s.rank()),
            StatusTable::Disputes => DisputeStatus::parse(status).map(|s| s.rank()),
        }
    }

    /// Status labels in priority order
    pub fn priority_order(&self) -> Vec<&'static str> {
        match self.table {
            StatusTable::Transactions => EscrowStatus::PRIORITY_ORDER
                .iter()
                .map(EscrowStatus::as_str)
                .collect(),
            StatusTable::Disputes => DisputeStatus::PRIORITY_ORDER
                .iter()
                .map(DisputeStatus::as_str)
                .collect(),
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::transactions()
    }
}

fn escrow_info(status: EscrowStatus) -> StatusInfo {
    match status {
        EscrowStatus::FundsLocked => StatusInfo {
            display_color: "blue",
            icon: "lock",
            is_active: true,
            sort_priority: status.rank(),
            tooltip: "Buyer funds are locked in escrow",
        },
        EscrowStatus::PendingReview => StatusInfo {
            display_color: "yellow",
            icon: "hourglass",
            is_active: true,
            sort_priority: status.rank(),
            tooltip: "Delivery reported, waiting for the buyer to review",
        },
        EscrowStatus::Fulfilled => StatusInfo {
            display_color: "green",
            icon: "check",
            is_active: false,
            sort_priority: status.rank(),
            tooltip: "Release conditions met, funds released to the seller",
        },
        // Listed with the closed escrows; arbitration progress lives on the dispute view.
        EscrowStatus::Disputed => StatusInfo {
            display_color: "red",
            icon: "alert",
            is_active: false,
            sort_priority: status.rank(),
            tooltip: "Dispute filed, the escrow is under arbitration",
        },
        EscrowStatus::Refunded => StatusInfo {
            display_color: "gray",
            icon: "return",
            is_active: false,
            sort_priority: status.rank(),
            tooltip: "Funds were returned to the buyer",
        },
    }
}

fn dispute_info(status: DisputeStatus) -> StatusInfo {
    match status {
        DisputeStatus::UnderReview => StatusInfo {
            display_color: "red",
            icon: "warning",
            is_active: true,
            sort_priority: status.rank(),
            tooltip: "Dispute is currently under review by arbitrator",
        },
        DisputeStatus::AwaitingResponse => StatusInfo {
            display_color: "yellow",
            icon: "hourglass",
            is_active: true,
            sort_priority: status.rank(),
            tooltip: "Waiting for a response from one of the parties",
        },
        DisputeStatus::EvidenceSubmitted => StatusInfo {
            display_color: "blue",
            icon: "document",
            is_active: true,
            sort_priority: status.rank(),
            tooltip: "Evidence has been submitted and is being reviewed",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Funds Locked", true, 0, "blue")]
    #[case("Pending Review", true, 1, "yellow")]
    #[case("Fulfilled", false, 2, "green")]
    #[case("Disputed", false, 3, "red")]
    #[case("Refunded", false, 4, "gray")]
    fn test_classify_transaction_statuses(
        #[case] status: &str,
        #[case] active: bool,
        #[case] priority: usize,
        #[case] color: &str,
    ) {
        let info = StatusClassifier::transactions().classify(status);
        assert_eq!(info.is_active, active);
        assert_eq!(info.sort_priority, priority);
        assert_eq!(info.display_color, color);
        assert!(!info.tooltip.is_empty());
    }

    #[rstest]
    #[case::unknown("Cancelled")]
    #[case::wrong_case("funds locked")]
    #[case::padded(" Funds Locked")]
    #[case::empty("")]
    fn test_unknown_transaction_status_falls_back_to_refunded(#[case] status: &str) {
        let classifier = StatusClassifier::transactions();
        assert_eq!(classifier.classify(status), classifier.classify("Refunded"));
    }

    #[rstest]
    #[case("Under Review", 0)]
    #[case("Awaiting Response", 1)]
    #[case("Evidence Submitted", 2)]
    fn test_classify_dispute_statuses(#[case] status: &str, #[case] priority: usize) {
        let info = StatusClassifier::disputes().classify(status);
        assert!(info.is_active);
        assert_eq!(info.sort_priority, priority);
    }

    #[test]
    fn test_unknown_dispute_status_is_inactive_and_last() {
        let info = StatusClassifier::disputes().classify("Awaiting Evidence");
        assert!(!info.is_active);
        assert_eq!(info.sort_priority, 3);
        assert_eq!(info.display_color, "gray");
    }

    #[test]
    fn test_disputed_is_not_active() {
        assert!(!StatusClassifier::transactions().is_active("Disputed"));
    }

    #[rstest]
    #[case("Funds Locked", Some(0))]
    #[case("Refunded", Some(4))]
    #[case("Cancelled", None)]
    fn test_priority_index(#[case] status: &str, #[case] expected: Option<usize>) {
        assert_eq!(StatusClassifier::transactions().priority_index(status), expected);
    }

    #[test]
    fn test_priority_index_agrees_with_sort_priority() {
        for table in [StatusTable::Transactions, StatusTable::Disputes] {
            let classifier = StatusClassifier::for_table(table);
            for label in classifier.priority_order() {
                assert_eq!(
                    classifier.priority_index(label),
                    Some(classifier.classify(label).sort_priority)
                );
            }
        }
    }

    #[test]
    fn test_priority_order_lists_every_status_once() {
        assert_eq!(
            StatusClassifier::transactions().priority_order(),
            vec!["Funds Locked", "Pending Review", "Fulfilled", "Disputed", "Refunded"]
        );
        assert_eq!(
            StatusClassifier::disputes().priority_order(),
            vec!["Under Review", "Awaiting Response", "Evidence Submitted"]
        );
        for status in EscrowStatus::PRIORITY_ORDER {
            assert_eq!(
                StatusClassifier::transactions().classify(status.as_str()).sort_priority,
                status.rank()
            );
        }
    }
}
