//! Dispute-related types for the escrow dashboard
//!
//! Disputes share the transaction shape (id, amount, parties, status) but
//! carry structured parties and a few arbitration-specific fields.

use super::amount::Amount;
use super::transaction::TransactionId;
use std::fmt;

/// Known dispute statuses, in dashboard priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisputeStatus {
    /// The arbitrator is reviewing the case
    UnderReview,

    /// Waiting on one of the parties to respond
    AwaitingResponse,

    /// New evidence was submitted and awaits review
    EvidenceSubmitted,
}

impl DisputeStatus {
    /// All statuses in priority order
    pub const PRIORITY_ORDER: [DisputeStatus; 3] = [
        DisputeStatus::UnderReview,
        DisputeStatus::AwaitingResponse,
        DisputeStatus::EvidenceSubmitted,
    ];

    pub fn rank(&self) -> usize {
        Self::PRIORITY_ORDER
            .iter()
            .position(|status| status == self)
            .unwrap_or(Self::PRIORITY_ORDER.len())
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Under Review" => Some(DisputeStatus::UnderReview),
            "Awaiting Response" => Some(DisputeStatus::AwaitingResponse),
            "Evidence Submitted" => Some(DisputeStatus::EvidenceSubmitted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::UnderReview => "Under Review",
            DisputeStatus::AwaitingResponse => "Awaiting Response",
            DisputeStatus::EvidenceSubmitted => "Evidence Submitted",
        }
    }
}

impl fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arbitration priority assigned to a dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse `High Priority` / `Medium Priority` / `Low Priority`
    ///
    /// The bare level (`high`, `Medium`) is accepted as well.
    pub fn parse(label: &str) -> Option<Self> {
        let level = label.trim();
        let level = level
            .strip_suffix(" Priority")
            .or_else(|| level.strip_suffix(" priority"))
            .unwrap_or(level);
        match level.to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Low Priority",
        }
    }
}

/// Which side of the escrow a party is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Buyer,
    Seller,
}

impl PartyRole {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "buyer" => Some(PartyRole::Buyer),
            "seller" => Some(PartyRole::Seller),
            _ => None,
        }
    }
}

/// Kind of the most recent action taken on a dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LastActionKind {
    EvidenceSubmitted,
    DisputeFiled,
    ResponseSubmitted,
}

impl LastActionKind {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "evidence submitted" => Some(LastActionKind::EvidenceSubmitted),
            "dispute filed" => Some(LastActionKind::DisputeFiled),
            "response submitted" => Some(LastActionKind::ResponseSubmitted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LastActionKind::EvidenceSubmitted => "Evidence submitted",
            LastActionKind::DisputeFiled => "Dispute filed",
            LastActionKind::ResponseSubmitted => "Response submitted",
        }
    }
}

/// Most recent action on a dispute and who took it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastAction {
    pub kind: LastActionKind,
    pub by: PartyRole,
}

/// A party to an escrow (display name plus optional wallet address)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub address: Option<String>,
}

impl Party {
    pub fn new(name: impl Into<String>, address: Option<String>) -> Self {
        Party {
            name: name.into(),
            address,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => write!(f, "{} ({})", self.name, address),
            None => f.write_str(&self.name),
        }
    }
}

/// Dispute as listed on the arbitration dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispute {
    /// Identifier of the disputed transaction
    pub id: TransactionId,

    /// Disputed amount
    pub amount: Amount,

    pub buyer: Party,

    pub seller: Party,

    /// Status label (normally one of [`DisputeStatus`])
    pub status: String,

    /// Arbitration priority, if assigned
    pub priority: Option<Priority>,

    /// Free-form decision estimate (e.g. `Within 3 days`)
    pub decision_expected: Option<String>,

    pub last_action: Option<LastAction>,
}

impl Dispute {
    /// Create a dispute without the optional arbitration fields
    pub fn new(
        id: impl Into<TransactionId>,
        amount: Amount,
        buyer: Party,
        seller: Party,
        status: impl Into<String>,
    ) -> Self {
        Dispute {
            id: id.into(),
            amount,
            buyer,
            seller,
            status: status.into(),
            priority: None,
            decision_expected: None,
            last_action: None,
        }
    }

    pub fn known_status(&self) -> Option<DisputeStatus> {
        DisputeStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("High Priority", Some(Priority::High))]
    #[case("Medium Priority", Some(Priority::Medium))]
    #[case("Low Priority", Some(Priority::Low))]
    #[case::bare_level("high", Some(Priority::High))]
    #[case::lowercase_suffix("low priority", Some(Priority::Low))]
    #[case::unknown("Urgent", None)]
    #[case::empty("", None)]
    fn test_priority_parse(#[case] label: &str, #[case] expected: Option<Priority>) {
        assert_eq!(Priority::parse(label), expected);
    }

    #[rstest]
    #[case("Evidence submitted", Some(LastActionKind::EvidenceSubmitted))]
    #[case("Dispute filed", Some(LastActionKind::DisputeFiled))]
    #[case("RESPONSE SUBMITTED", Some(LastActionKind::ResponseSubmitted))]
    #[case("Appealed", None)]
    fn test_last_action_kind_parse(#[case] label: &str, #[case] expected: Option<LastActionKind>) {
        assert_eq!(LastActionKind::parse(label), expected);
    }

    #[test]
    fn test_party_display() {
        let party = Party::new("Alice B.", Some("0xAbc...123".to_string()));
        assert_eq!(party.to_string(), "Alice B. (0xAbc...123)");
        assert_eq!(Party::new("Bob C.", None).to_string(), "Bob C.");
    }

    #[test]
    fn test_dispute_status_round_trip_labels() {
        for status in DisputeStatus::PRIORITY_ORDER {
            assert_eq!(DisputeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DisputeStatus::parse("Awaiting Evidence"), None);
    }

    #[test]
    fn test_dispute_rank_follows_priority_order() {
        for (position, status) in DisputeStatus::PRIORITY_ORDER.iter().enumerate() {
            assert_eq!(status.rank(), position);
        }
    }
}
