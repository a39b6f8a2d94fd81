//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `amount`: Value/currency pairs and their filter-key rendering
//! - `transaction`: Escrow transactions and their statuses
//! - `dispute`: Disputes, parties and arbitration metadata
//! - `error`: Error types for the dashboard engine

pub mod amount;
pub mod dispute;
pub mod error;
pub mod transaction;

pub use amount::{js_number_string, parse_decimal, Amount};
pub use dispute::{Dispute, DisputeStatus, LastAction, LastActionKind, Party, PartyRole, Priority};
pub use error::DashboardError;
pub use transaction::{EscrowStatus, Transaction, TransactionId};
