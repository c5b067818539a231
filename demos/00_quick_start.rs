/// quick start - quoting and submitting one partial payment
use chrono::{Duration, TimeZone, Utc};
use rent_settlement_rs::{
    Bill, BillId, DispatchOutcome, GatewayDispatcher, Money, PartialPaymentRequest,
    PaymentCountProvider, Result, SafeTimeProvider, SettlementConfig, SettlementEngine,
    TimeSource, Uuid,
};

struct LedgerStub;

impl PaymentCountProvider for LedgerStub {
    fn payment_count(&self, _bill_id: BillId) -> Result<u32> {
        Ok(0)
    }
}

struct GatewayStub;

impl GatewayDispatcher for GatewayStub {
    fn dispatch(&self, request: &PartialPaymentRequest) -> Result<DispatchOutcome> {
        Ok(DispatchOutcome::RedirectToGateway {
            payment_url: format!("https://gateway.example/pay/{}", request.bill_id),
        })
    }
}

fn main() -> Result<()> {
    let due_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(due_date + Duration::days(40)));

    // a 10m bill, 40 days past due, nothing paid yet
    let bill = Bill {
        id: Uuid::new_v4(),
        total_amount: Money::from_major(10_000_000),
        paid_amount: Money::ZERO,
        outstanding_amount: Some(Money::from_major(10_000_000)),
        due_date,
        is_partially_paid: false,
        last_payment_date: None,
        partial_payment_fees_collected: Money::ZERO,
    };

    let mut engine =
        SettlementEngine::new(SettlementConfig::online_gateway(), LedgerStub, GatewayStub)?;

    // quote the minimum instalment
    let quote = engine.quote(&bill, Money::from_major(5_000_000), &time);
    println!("window: {} ..= {}", quote.bounds.minimum, quote.bounds.maximum);
    println!("fee: {}", quote.fee.fee);
    println!("interest: {} ({} overdue months)", quote.interest.interest_amount, quote.interest.overdue_months);
    println!("total due: {}", quote.total_with_fees);

    // submit it
    let outcome = engine.submit(&bill, Money::from_major(5_000_000), "first instalment", &time)?;
    if let DispatchOutcome::RedirectToGateway { payment_url } = &outcome.dispatch {
        println!("redirect tenant to {payment_url}");
    }
    println!("refresh bill before next attempt: {}", outcome.refresh_required);

    Ok(())
}
