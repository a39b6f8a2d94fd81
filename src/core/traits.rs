//! Core traits shared by the dashboard pipeline stages
//!
//! Transactions and disputes have different party shapes but expose the same
//! view to filtering, ordering, grouping and routing. Every stage is generic
//! over [`EscrowRecord`] so the same code serves both listings.

use crate::types::{Amount, Dispute, Transaction};

/// Read-only view of a record listed on the dashboard
pub trait EscrowRecord {
    /// Unique identifier
    fn id(&self) -> &str;

    /// Raw status label
    fn status(&self) -> &str;

    /// Escrowed amount
    fn amount(&self) -> &Amount;

    /// Buyer display name
    fn buyer_name(&self) -> &str;

    /// Seller display name
    fn seller_name(&self) -> &str;
}

impl EscrowRecord for Transaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn amount(&self) -> &Amount {
        &self.amount
    }

    fn buyer_name(&self) -> &str {
        &self.buyer
    }

    fn seller_name(&self) -> &str {
        &self.seller
    }
}

impl EscrowRecord for Dispute {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn amount(&self) -> &Amount {
        &self.amount
    }

    fn buyer_name(&self) -> &str {
        &self.buyer.name
    }

    fn seller_name(&self) -> &str {
        &self.seller.name
    }
}

impl<T: EscrowRecord + ?Sized> EscrowRecord for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn status(&self) -> &str {
        (**self).status()
    }

    fn amount(&self) -> &Amount {
        (**self).amount()
    }

    fn buyer_name(&self) -> &str {
        (**self).buyer_name()
    }

    fn seller_name(&self) -> &str {
        (**self).seller_name()
    }
}
