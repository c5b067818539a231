use chrono::{DateTime, Utc};

use crate::composer::{PartialPaymentRequest, SettlementComposer};
use crate::config::SettlementConfig;
use crate::errors::{Result, SettlementError};
use crate::types::Bill;

/// how the receiving side treats client-computed figures that disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPolicy {
    /// refuse the request on any mismatch
    Reject,
    /// replace the client figures with the recomputed ones
    Clamp,
}

/// server-side recomputation of an incoming settlement request
///
/// the engine's quote is client-computed and travels inside the request,
/// so it is never authoritative. the verifier re-derives bounds, fee,
/// interest and eligibility from the ledger's own bill and payment count
/// and refuses or clamps anything that disagrees.
pub struct SettlementVerifier {
    composer: SettlementComposer,
    policy: VerificationPolicy,
}

impl SettlementVerifier {
    pub fn new(config: SettlementConfig, policy: VerificationPolicy) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            composer: SettlementComposer::new(config),
            policy,
        })
    }

    /// recompute from authoritative state and refuse or clamp mismatches
    pub fn verify(
        &self,
        bill: &Bill,
        payment_count: u32,
        request: &PartialPaymentRequest,
        now: DateTime<Utc>,
    ) -> Result<PartialPaymentRequest> {
        let quote = self.composer.quote(
            bill,
            payment_count,
            request.original_payment_amount,
            now,
        );
        self.composer.validate(&quote)?;

        let checks = [
            ("partialPaymentFee", quote.fee.fee, request.partial_payment_fee),
            (
                "overdueInterest",
                quote.interest.interest_amount,
                request.overdue_interest,
            ),
            ("totalWithFees", quote.total_with_fees, request.total_with_fees),
        ];

        let mismatched = checks.iter().find(|(_, expected, provided)| expected != provided);
        if let Some(&(field, expected, provided)) = mismatched {
            match self.policy {
                VerificationPolicy::Reject => {
                    return Err(SettlementError::QuoteMismatch {
                        field,
                        expected,
                        provided,
                    });
                }
                VerificationPolicy::Clamp => {
                    return self.composer.compose(&quote, &request.notes);
                }
            }
        }

        Ok(request.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use crate::decimal::Money;

    fn due_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        due_date() + Duration::days(40)
    }

    fn ledger_bill() -> Bill {
        Bill {
            id: Uuid::new_v4(),
            total_amount: Money::from_major(10_000_000),
            paid_amount: Money::ZERO,
            outstanding_amount: Some(Money::from_major(10_000_000)),
            due_date: due_date(),
            is_partially_paid: false,
            last_payment_date: None,
            partial_payment_fees_collected: Money::ZERO,
        }
    }

    fn honest_request(bill: &Bill) -> PartialPaymentRequest {
        let composer = SettlementComposer::new(SettlementConfig::online_gateway());
        let quote = composer.quote(bill, 0, Money::from_major(5_000_000), now());
        composer.compose(&quote, "first instalment").unwrap()
    }

    fn verifier(policy: VerificationPolicy) -> SettlementVerifier {
        SettlementVerifier::new(SettlementConfig::online_gateway(), policy).unwrap()
    }

    #[test]
    fn test_honest_request_passes_unchanged() {
        let bill = ledger_bill();
        let request = honest_request(&bill);

        let verified = verifier(VerificationPolicy::Reject)
            .verify(&bill, 0, &request, now())
            .unwrap();
        assert_eq!(verified, request);
    }

    #[test]
    fn test_tampered_fee_is_refused() {
        let bill = ledger_bill();
        let mut request = honest_request(&bill);
        request.partial_payment_fee = Money::from_major(1);

        match verifier(VerificationPolicy::Reject).verify(&bill, 0, &request, now()) {
            Err(SettlementError::QuoteMismatch { field, expected, provided }) => {
                assert_eq!(field, "partialPaymentFee");
                assert_eq!(expected, Money::from_major(200_000));
                assert_eq!(provided, Money::from_major(1));
            }
            other => panic!("expected quote mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_tampered_interest_is_refused() {
        let bill = ledger_bill();
        let mut request = honest_request(&bill);
        request.overdue_interest = Money::ZERO;

        assert!(matches!(
            verifier(VerificationPolicy::Reject).verify(&bill, 0, &request, now()),
            Err(SettlementError::QuoteMismatch { field: "overdueInterest", .. })
        ));
    }

    #[test]
    fn test_understated_total_is_refused() {
        let bill = ledger_bill();
        let mut request = honest_request(&bill);
        request.total_with_fees = request.original_payment_amount;

        assert!(matches!(
            verifier(VerificationPolicy::Reject).verify(&bill, 0, &request, now()),
            Err(SettlementError::QuoteMismatch { field: "totalWithFees", .. })
        ));
    }

    #[test]
    fn test_clamp_policy_restores_the_recomputed_figures() {
        let bill = ledger_bill();
        let mut request = honest_request(&bill);
        request.partial_payment_fee = Money::from_major(1);
        request.total_with_fees = Money::from_major(5_000_001);

        let verified = verifier(VerificationPolicy::Clamp)
            .verify(&bill, 0, &request, now())
            .unwrap();

        assert_eq!(verified.partial_payment_fee, Money::from_major(200_000));
        assert_eq!(verified.overdue_interest, Money::from_major(200_000));
        assert_eq!(verified.total_with_fees, Money::from_major(5_400_000));
        assert_eq!(verified.notes, request.notes);
    }

    #[test]
    fn test_server_reapplies_the_cooldown_gate() {
        // client-side disabling was bypassed; the verifier still refuses
        let mut bill = ledger_bill();
        let request = honest_request(&bill);
        bill.is_partially_paid = true;
        bill.last_payment_date = Some("2024-07-01 00:00:00".to_string());

        let check_time = Utc.with_ymd_and_hms(2024, 7, 11, 0, 0, 0).unwrap();
        match verifier(VerificationPolicy::Reject).verify(&bill, 1, &request, check_time) {
            Err(SettlementError::CooldownActive { remaining_days }) => {
                assert_eq!(remaining_days, 20);
            }
            other => panic!("expected cool-down rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_server_reapplies_the_bounds() {
        let bill = ledger_bill();
        let mut request = honest_request(&bill);
        request.original_payment_amount = Money::from_major(100_000);

        assert!(matches!(
            verifier(VerificationPolicy::Reject).verify(&bill, 0, &request, now()),
            Err(SettlementError::PaymentBelowMinimum { .. })
        ));
    }

    #[test]
    fn test_authoritative_count_overrides_the_client_fee_tier() {
        // the ledger has already accepted two payments; a request priced at
        // the first-attempt fee must not slip through
        let bill = ledger_bill();
        let request = honest_request(&bill);

        assert!(matches!(
            verifier(VerificationPolicy::Reject).verify(&bill, 2, &request, now()),
            Err(SettlementError::QuoteMismatch { field: "partialPaymentFee", .. })
        ));
    }
}
