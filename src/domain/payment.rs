use serde::{Deserialize, Serialize};

/// A checkout payment owned by the host system.
///
/// The gateway adapter only ever writes `dps_reference`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: u64,
    /// The billing entity that is paying, if known.
    pub paid_by: Option<u64>,
    /// Gateway transaction reference (`DpsTxnRef`) from the last check.
    pub dps_reference: Option<String>,
}

impl PaymentRecord {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            paid_by: None,
            dps_reference: None,
        }
    }

    pub fn paid_by(mut self, billing_entity: u64) -> Self {
        self.paid_by = Some(billing_entity);
        self
    }
}

/// The party a recurring-billing token is stored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingEntity {
    pub id: u64,
    /// `DpsBillingId` usable for later charges without re-entering card details.
    pub billing_id: Option<String>,
}

impl BillingEntity {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            billing_id: None,
        }
    }
}
