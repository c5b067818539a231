/// time control - interest growth and the cool-down under a test clock
use chrono::{Duration, TimeZone, Utc};
use rent_settlement_rs::{
    Bill, Money, SafeTimeProvider, SettlementComposer, SettlementConfig, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let due_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(due_date));
    let controller = time.test_control().unwrap();

    let mut bill = Bill {
        id: Uuid::new_v4(),
        total_amount: Money::from_major(10_000_000),
        paid_amount: Money::ZERO,
        outstanding_amount: Some(Money::from_major(10_000_000)),
        due_date,
        is_partially_paid: false,
        last_payment_date: None,
        partial_payment_fees_collected: Money::ZERO,
    };

    let composer = SettlementComposer::new(SettlementConfig::online_gateway());
    let proposed = Money::from_major(5_000_000);

    // on the due date no interest accrues yet
    let quote = composer.quote(&bill, 0, proposed, time.now());
    println!("{}: interest {}", time.now().format("%Y-%m-%d"), quote.interest.interest_amount);

    // each advance starts another average-length month
    for _ in 0..4 {
        controller.advance(Duration::days(31));
        let quote = composer.quote(&bill, 0, proposed, time.now());
        println!(
            "{}: interest {} ({} months, cap applied: {})",
            time.now().format("%Y-%m-%d"),
            quote.interest.interest_amount,
            quote.interest.overdue_months,
            quote.interest.cap_applied,
        );
    }

    // record a partial payment and watch the cool-down gate
    bill.is_partially_paid = true;
    bill.paid_amount = proposed;
    bill.outstanding_amount = Some(Money::from_major(5_000_000));
    bill.last_payment_date = Some(time.now().format("%Y-%m-%d %H:%M:%S").to_string());

    controller.advance(Duration::days(10));
    let quote = composer.quote(&bill, 1, Money::from_major(2_500_000), time.now());
    println!(
        "\n10 days after paying: eligible = {}, {} day(s) remaining",
        quote.eligibility.eligible, quote.eligibility.remaining_days
    );

    controller.advance(Duration::days(20));
    let quote = composer.quote(&bill, 1, Money::from_major(2_500_000), time.now());
    println!(
        "30 days after paying: eligible = {}",
        quote.eligibility.eligible
    );

    Ok(())
}
