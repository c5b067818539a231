use thiserror::Error;

use crate::decimal::Money;
use crate::types::BillId;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("nothing outstanding on bill {bill_id}")]
    NothingOutstanding {
        bill_id: BillId,
    },

    #[error("payment below minimum: minimum {minimum}, proposed {proposed}")]
    PaymentBelowMinimum {
        minimum: Money,
        proposed: Money,
    },

    #[error("payment above maximum: maximum {maximum}, proposed {proposed}")]
    PaymentAboveMaximum {
        maximum: Money,
        proposed: Money,
    },

    #[error("cool-down active: {remaining_days} day(s) until the next partial payment")]
    CooldownActive {
        remaining_days: u32,
    },

    #[error("payment count unavailable for bill {bill_id}: {message}")]
    PaymentCountUnavailable {
        bill_id: BillId,
        message: String,
    },

    #[error("dispatch rejected: {message}")]
    DispatchRejected {
        message: String,
    },

    #[error("quote mismatch on {field}: expected {expected}, provided {provided}")]
    QuoteMismatch {
        field: &'static str,
        expected: Money,
        provided: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SettlementError>;
