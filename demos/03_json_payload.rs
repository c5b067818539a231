/// json payload - the wire shape sent to the payment collaborator
use chrono::{Duration, TimeZone, Utc};
use rent_settlement_rs::{
    Bill, Money, SettlementComposer, SettlementConfig, SettlementVerifier, VerificationPolicy,
    Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let due_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let now = due_date + Duration::days(40);

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

    let composer = SettlementComposer::new(SettlementConfig::online_gateway());
    let quote = composer.quote(&bill, 0, Money::from_major(5_000_000), now);
    let request = composer.compose(&quote, "first instalment")?;

    println!("{}", serde_json::to_string_pretty(&request)?);

    // the receiving side re-derives every figure before trusting it
    let verifier = SettlementVerifier::new(
        SettlementConfig::online_gateway(),
        VerificationPolicy::Reject,
    )?;
    let verified = verifier.verify(&bill, 0, &request, now)?;
    println!("\nverified total: {}", verified.total_with_fees);

    let mut tampered = request.clone();
    tampered.partial_payment_fee = Money::ZERO;
    tampered.total_with_fees = tampered.original_payment_amount;
    match verifier.verify(&bill, 0, &tampered, now) {
        Err(err) => println!("tampered request refused: {err}"),
        Ok(_) => println!("unexpected: tampered request accepted"),
    }

    Ok(())
}
