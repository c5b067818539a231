use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{BillId, PaymentMethod};

/// all events that can be emitted by the settlement engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// fee, interest and total re-derived for a proposed amount
    QuoteRecomputed {
        bill_id: BillId,
        proposed_amount: Money,
        fee: Money,
        interest: Money,
        total_with_fees: Money,
        timestamp: DateTime<Utc>,
    },

    /// payment count fetch failed; the most conservative tier was assumed
    PaymentCountDefaulted {
        bill_id: BillId,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// submission refused before dispatch
    SubmissionRejected {
        bill_id: BillId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// submission refused because the cool-down has not elapsed
    CooldownRejected {
        bill_id: BillId,
        remaining_days: u32,
        timestamp: DateTime<Utc>,
    },

    /// composed request handed to the gateway or landlord endpoint
    SettlementDispatched {
        bill_id: BillId,
        amount: Money,
        total_with_fees: Money,
        payment_method: PaymentMethod,
        timestamp: DateTime<Utc>,
    },

    /// bill and payment count must be refetched before the next attempt
    BillRefreshRequested {
        bill_id: BillId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
