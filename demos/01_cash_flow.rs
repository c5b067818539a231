/// cash flow - landlord-mediated confirmation and the conservative first cap
use chrono::{Duration, TimeZone, Utc};
use rent_settlement_rs::{
    Bill, BillId, DispatchOutcome, GatewayDispatcher, Money, PartialPaymentRequest,
    PaymentCountProvider, Result, SafeTimeProvider, SettlementConfig, SettlementEngine,
    SettlementError, TimeSource, Uuid,
};

struct LedgerStub;

impl PaymentCountProvider for LedgerStub {
    fn payment_count(&self, _bill_id: BillId) -> Result<u32> {
        Ok(0)
    }
}

struct LandlordInbox;

impl GatewayDispatcher for LandlordInbox {
    fn dispatch(&self, request: &PartialPaymentRequest) -> Result<DispatchOutcome> {
        println!(
            "landlord inbox: {} pays {} (\"{}\")",
            request.bill_id, request.total_with_fees, request.notes
        );
        Ok(DispatchOutcome::AwaitingConfirmation)
    }
}

fn main() -> Result<()> {
    let due_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(due_date + Duration::days(10)));

    let bill = Bill {
        id: Uuid::new_v4(),
        total_amount: Money::from_major(8_000_000),
        paid_amount: Money::ZERO,
        outstanding_amount: Some(Money::from_major(8_000_000)),
        due_date,
        is_partially_paid: false,
        last_payment_date: None,
        partial_payment_fees_collected: Money::ZERO,
    };

    let mut engine =
        SettlementEngine::new(SettlementConfig::cash_confirmation(), LedgerStub, LandlordInbox)?;

    // the cash flow caps the first attempt at 80% of the balance
    match engine.submit(&bill, Money::from_major(7_000_000), "", &time) {
        Err(SettlementError::PaymentAboveMaximum { maximum, proposed }) => {
            println!("refused: {proposed} exceeds the first-attempt cap {maximum}");
        }
        other => println!("unexpected: {other:?}"),
    }

    // an in-window amount goes through with the fixed cash note
    let outcome = engine.submit(&bill, Money::from_major(6_000_000), "", &time)?;
    println!("dispatch: {:?}", outcome.dispatch);
    println!("note: {}", outcome.request.notes);

    Ok(())
}
