use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundsCalculator, PaymentBounds};
use crate::config::SettlementConfig;
use crate::decimal::Money;
use crate::eligibility::{EligibilityGate, EligibilityStatus};
use crate::errors::{Result, SettlementError};
use crate::fees::{FeeAssessment, FeeScheduleEngine};
use crate::interest::{InterestAccrual, OverdueInterestEngine};
use crate::types::{Bill, BillId, PaymentMethod};

/// settlement request assembled for dispatch; immutable once composed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPaymentRequest {
    pub bill_id: BillId,
    /// the tenant-facing instalment
    pub original_payment_amount: Money,
    pub partial_payment_fee: Money,
    pub overdue_interest: Money,
    /// instalment + fee + interest
    pub total_with_fees: Money,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// consistent view of one proposed instalment
///
/// every field is re-derived together; callers must never carry a stale
/// quote across an amount edit or a bill refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementQuote {
    pub bill_id: BillId,
    pub payment_count: u32,
    pub proposed_amount: Money,
    pub outstanding: Money,
    pub bounds: PaymentBounds,
    pub fee: FeeAssessment,
    pub interest: InterestAccrual,
    pub eligibility: EligibilityStatus,
    pub total_with_fees: Money,
}

/// combines bounds, fee schedule, interest and the cool-down gate into a
/// single consistent request per proposed amount
pub struct SettlementComposer {
    bounds: BoundsCalculator,
    fees: FeeScheduleEngine,
    interest: OverdueInterestEngine,
    gate: EligibilityGate,
    payment_method: PaymentMethod,
}

impl SettlementComposer {
    pub fn new(config: SettlementConfig) -> Self {
        Self {
            bounds: BoundsCalculator::new(config.bounds_policy),
            fees: FeeScheduleEngine::new(config.fee_schedule),
            interest: OverdueInterestEngine::new(config.interest_config),
            gate: EligibilityGate::new(config.cooldown_config),
            payment_method: config.payment_method,
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// recompute the full quote; invoked from every trigger site that can
    /// change it (amount edit, min/max shortcut, refreshed bill snapshot)
    pub fn quote(
        &self,
        bill: &Bill,
        payment_count: u32,
        proposed: Money,
        now: DateTime<Utc>,
    ) -> SettlementQuote {
        let outstanding = bill.effective_outstanding();
        let bounds = self.bounds.calculate(outstanding, payment_count);
        let fee = self.fees.fee_for(payment_count);
        let interest = self.interest.accrue(outstanding, proposed, bill.due_date, now);
        let eligibility = self.gate.check(bill, now);
        let total_with_fees = proposed + fee.fee + interest.interest_amount;

        SettlementQuote {
            bill_id: bill.id,
            payment_count,
            proposed_amount: proposed,
            outstanding,
            bounds,
            fee,
            interest,
            eligibility,
            total_with_fees,
        }
    }

    /// validate a quote for submission
    ///
    /// ordering matters: amount sanity, then the outstanding balance, then
    /// the violated bound, then the cool-down. the first failure wins and
    /// reports the exact limit that was breached.
    pub fn validate(&self, quote: &SettlementQuote) -> Result<()> {
        if !quote.proposed_amount.is_positive() {
            return Err(SettlementError::InvalidPaymentAmount {
                amount: quote.proposed_amount,
            });
        }
        if !quote.outstanding.is_positive() || !quote.bounds.is_payable() {
            return Err(SettlementError::NothingOutstanding {
                bill_id: quote.bill_id,
            });
        }
        if quote.proposed_amount < quote.bounds.minimum {
            return Err(SettlementError::PaymentBelowMinimum {
                minimum: quote.bounds.minimum,
                proposed: quote.proposed_amount,
            });
        }
        if quote.proposed_amount > quote.bounds.maximum {
            return Err(SettlementError::PaymentAboveMaximum {
                maximum: quote.bounds.maximum,
                proposed: quote.proposed_amount,
            });
        }
        if !quote.eligibility.eligible {
            return Err(SettlementError::CooldownActive {
                remaining_days: quote.eligibility.remaining_days,
            });
        }

        Ok(())
    }

    /// validate and freeze the quote into a dispatchable request
    pub fn compose(&self, quote: &SettlementQuote, notes: &str) -> Result<PartialPaymentRequest> {
        self.validate(quote)?;

        Ok(PartialPaymentRequest {
            bill_id: quote.bill_id,
            original_payment_amount: quote.proposed_amount,
            partial_payment_fee: quote.fee.fee,
            overdue_interest: quote.interest.interest_amount,
            total_with_fees: quote.total_with_fees,
            payment_method: self.payment_method,
            notes: notes.to_string(),
        })
    }
}
