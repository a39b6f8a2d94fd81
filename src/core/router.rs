//! Click-through routing for dashboard records
//!
//! A record opens one of three views:
//!
//! - the aggregate dashboard, when its id is the configured sentinel
//! - the dispute arbitration view, when its status is `Disputed`
//! - the transaction detail view otherwise
//!
//! The sentinel check wins over the status check.

use crate::core::traits::EscrowRecord;
use crate::types::EscrowStatus;
use std::fmt;

/// Record id that opens the aggregate dashboard instead of a detail view
pub const DEFAULT_DASHBOARD_SENTINEL: &str = "TXN78901";

/// Navigation destination for a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Aggregate dashboard (`/dashboard`)
    Dashboard,

    /// Dispute arbitration view (`/disputes/{id}`)
    Dispute(String),

    /// Transaction detail view (`/transactions/{id}`)
    TransactionDetail(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("/dashboard"),
            Route::Dispute(id) => write!(f, "/disputes/{}", id),
            Route::TransactionDetail(id) => write!(f, "/transactions/{}", id),
        }
    }
}

/// Routing rule with a configurable sentinel id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    sentinel: String,
}

impl Router {
    pub fn new() -> Self {
        Self::with_sentinel(DEFAULT_DASHBOARD_SENTINEL)
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Router {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Destination for a clicked record
    pub fn route_for<R: EscrowRecord>(&self, record: &R) -> Route {
        if record.id() == self.sentinel {
            Route::Dashboard
        } else if record.status() == EscrowStatus::Disputed.as_str() {
            Route::Dispute(record.id().to_string())
        } else {
            Route::TransactionDetail(record.id().to_string())
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Route with the default sentinel
pub fn route_for<R: EscrowRecord>(record: &R) -> Route {
    Router::new().route_for(record)
}
