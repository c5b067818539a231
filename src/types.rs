use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a bill
pub type BillId = Uuid;

/// how a settlement is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// tenant self-service through the online payment gateway
    OnlineGateway,
    /// handed to the landlord in cash, awaiting manual confirmation
    Cash,
}

/// read-only bill snapshot supplied by the ledger service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub total_amount: Money,
    pub paid_amount: Money,
    /// outstanding balance as reported by the ledger; the reported value
    /// wins over total minus paid when the two drift apart
    pub outstanding_amount: Option<Money>,
    /// date past which overdue interest accrues
    pub due_date: DateTime<Utc>,
    /// true once at least one partial payment has been recorded
    pub is_partially_paid: bool,
    /// raw timestamp text of the most recent partial payment; encoding varies
    pub last_payment_date: Option<String>,
    /// cumulative settlement fees already charged, display only
    pub partial_payment_fees_collected: Money,
}

impl Bill {
    /// balance the engine computes against
    pub fn effective_outstanding(&self) -> Money {
        self.outstanding_amount.unwrap_or(self.total_amount)
    }
}
