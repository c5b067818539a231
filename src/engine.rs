use hourglass_rs::SafeTimeProvider;

use crate::composer::{PartialPaymentRequest, SettlementComposer, SettlementQuote};
use crate::config::SettlementConfig;
use crate::decimal::Money;
use crate::errors::{Result, SettlementError};
use crate::events::{Event, EventStore};
use crate::types::{Bill, BillId, PaymentMethod};

/// fixed note attached to cash submissions when the caller supplies none
pub const CASH_SETTLEMENT_NOTE: &str = "cash settlement";

/// collaborator supplying how many partial payments a bill has accepted
pub trait PaymentCountProvider {
    fn payment_count(&self, bill_id: BillId) -> Result<u32>;
}

/// collaborator receiving the composed settlement request
pub trait GatewayDispatcher {
    fn dispatch(&self, request: &PartialPaymentRequest) -> Result<DispatchOutcome>;
}

/// dispatcher response for an accepted settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// online flow: the caller must redirect the tenant to the gateway
    RedirectToGateway { payment_url: String },
    /// cash flow: record stored, awaiting landlord confirmation
    AwaitingConfirmation,
}

/// result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementOutcome {
    pub request: PartialPaymentRequest,
    pub dispatch: DispatchOutcome,
    /// the bill and payment count changed; refetch before the next attempt
    pub refresh_required: bool,
}

/// orchestrates quoting, validation and dispatch for one bill
///
/// the quote it produces is a proposal: the receiving ledger service must
/// recompute independently (see SettlementVerifier) before trusting any
/// client-computed figure.
pub struct SettlementEngine<P, G> {
    composer: SettlementComposer,
    provider: P,
    dispatcher: G,
    pub events: EventStore,
}

impl<P: PaymentCountProvider, G: GatewayDispatcher> SettlementEngine<P, G> {
    pub fn new(config: SettlementConfig, provider: P, dispatcher: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            composer: SettlementComposer::new(config),
            provider,
            dispatcher,
            events: EventStore::new(),
        })
    }

    /// fetch the prior-payment count, failing safe to zero
    ///
    /// a fetch failure must not block the tenant; zero selects the most
    /// conservative fee tier and the tightest first-attempt bound.
    fn fetch_payment_count(&mut self, bill_id: BillId, time: &SafeTimeProvider) -> u32 {
        match self.provider.payment_count(bill_id) {
            Ok(count) => count,
            Err(err) => {
                self.events.emit(Event::PaymentCountDefaulted {
                    bill_id,
                    message: err.to_string(),
                    timestamp: time.now(),
                });
                0
            }
        }
    }

    /// recompute the quote for a proposed instalment
    pub fn quote(
        &mut self,
        bill: &Bill,
        proposed: Money,
        time: &SafeTimeProvider,
    ) -> SettlementQuote {
        let payment_count = self.fetch_payment_count(bill.id, time);
        let quote = self.composer.quote(bill, payment_count, proposed, time.now());

        self.events.emit(Event::QuoteRecomputed {
            bill_id: quote.bill_id,
            proposed_amount: quote.proposed_amount,
            fee: quote.fee.fee,
            interest: quote.interest.interest_amount,
            total_with_fees: quote.total_with_fees,
            timestamp: time.now(),
        });

        quote
    }

    /// quote, validate, compose and dispatch one settlement attempt
    ///
    /// dispatch failures surface the collaborator message verbatim and are
    /// never retried here; repeating a financial submission is the
    /// caller's explicit decision.
    pub fn submit(
        &mut self,
        bill: &Bill,
        proposed: Money,
        notes: &str,
        time: &SafeTimeProvider,
    ) -> Result<SettlementOutcome> {
        let quote = self.quote(bill, proposed, time);

        if let Err(err) = self.composer.validate(&quote) {
            match &err {
                SettlementError::CooldownActive { remaining_days } => {
                    self.events.emit(Event::CooldownRejected {
                        bill_id: bill.id,
                        remaining_days: *remaining_days,
                        timestamp: time.now(),
                    });
                }
                other => {
                    self.events.emit(Event::SubmissionRejected {
                        bill_id: bill.id,
                        reason: other.to_string(),
                        timestamp: time.now(),
                    });
                }
            }
            return Err(err);
        }

        let notes = if notes.is_empty() && self.composer.payment_method() == PaymentMethod::Cash {
            CASH_SETTLEMENT_NOTE
        } else {
            notes
        };
        let request = self.composer.compose(&quote, notes)?;
        let dispatch = self.dispatcher.dispatch(&request)?;

        self.events.emit(Event::SettlementDispatched {
            bill_id: request.bill_id,
            amount: request.original_payment_amount,
            total_with_fees: request.total_with_fees,
            payment_method: request.payment_method,
            timestamp: time.now(),
        });
        self.events.emit(Event::BillRefreshRequested {
            bill_id: request.bill_id,
            timestamp: time.now(),
        });

        Ok(SettlementOutcome {
            request,
            dispatch,
            refresh_required: true,
        })
    }
}
