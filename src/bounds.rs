use crate::config::BoundsPolicy;
use crate::decimal::Money;

/// instalment window for one partial payment attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentBounds {
    pub minimum: Money,
    pub maximum: Money,
}

impl PaymentBounds {
    /// window for a bill with nothing left to pay
    pub fn empty() -> Self {
        Self {
            minimum: Money::ZERO,
            maximum: Money::ZERO,
        }
    }

    /// whether any positive instalment is accepted at all
    pub fn is_payable(&self) -> bool {
        self.maximum.is_positive()
    }

    /// whether the amount falls inside the window
    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.minimum && amount <= self.maximum
    }
}

/// derives the instalment window for the current attempt
pub struct BoundsCalculator {
    pub policy: BoundsPolicy,
}

impl BoundsCalculator {
    pub fn new(policy: BoundsPolicy) -> Self {
        Self { policy }
    }

    /// min/max instalment for the given outstanding balance and attempt
    ///
    /// a zero or negative balance yields an empty window; callers must
    /// reject the attempt rather than dispatch a zero settlement.
    pub fn calculate(&self, outstanding: Money, payment_count: u32) -> PaymentBounds {
        if !outstanding.is_positive() {
            return PaymentBounds::empty();
        }

        PaymentBounds {
            minimum: outstanding.scaled(self.policy.minimum_ratio),
            maximum: outstanding.scaled(self.policy.max_ratio_for(payment_count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::decimal::Rate;

    #[test]
    fn test_minimum_is_half_the_outstanding_balance() {
        let calc = BoundsCalculator::new(BoundsPolicy::full());
        let bounds = calc.calculate(Money::from_major(10_000_000), 0);

        assert_eq!(bounds.minimum, Money::from_major(5_000_000));
        assert_eq!(bounds.maximum, Money::from_major(10_000_000));
    }

    #[test]
    fn test_conservative_policy_caps_first_attempt() {
        let calc = BoundsCalculator::new(BoundsPolicy::conservative_first());
        let outstanding = Money::from_major(10_000_000);

        let first = calc.calculate(outstanding, 0);
        assert_eq!(first.maximum, Money::from_major(8_000_000));

        let second = calc.calculate(outstanding, 1);
        assert_eq!(second.maximum, Money::from_major(10_000_000));
    }

    #[test]
    fn test_bounds_ordering_holds_for_both_policies() {
        for policy in [BoundsPolicy::conservative_first(), BoundsPolicy::full()] {
            let calc = BoundsCalculator::new(policy);
            for amount in [1_i64, 999, 3_500_000, 10_000_000] {
                for count in 0..4 {
                    let bounds = calc.calculate(Money::from_major(amount), count);
                    assert!(bounds.minimum <= bounds.maximum);
                    assert_eq!(
                        bounds.minimum,
                        Money::from_major(amount).scaled(Rate::from_decimal(dec!(0.5)))
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_outstanding_is_unpayable() {
        let calc = BoundsCalculator::new(BoundsPolicy::full());

        let bounds = calc.calculate(Money::ZERO, 0);
        assert_eq!(bounds, PaymentBounds::empty());
        assert!(!bounds.is_payable());

        let negative = calc.calculate(Money::from_major(-500), 2);
        assert!(!negative.is_payable());
    }

    #[test]
    fn test_window_from_decorated_display_string() {
        // balances arrive from the ledger screen with currency decoration
        let calc = BoundsCalculator::new(BoundsPolicy::conservative_first());
        let outstanding = Money::parse_lenient("10.000.000 ₫");

        let bounds = calc.calculate(outstanding, 0);
        assert_eq!(bounds.minimum, Money::from_major(5_000_000));
        assert_eq!(bounds.maximum, Money::from_major(8_000_000));

        // a string with no digits is unpayable, not an error
        let bounds = calc.calculate(Money::parse_lenient("n/a"), 0);
        assert!(!bounds.is_payable());
    }

    #[test]
    fn test_contains() {
        let calc = BoundsCalculator::new(BoundsPolicy::full());
        let bounds = calc.calculate(Money::from_major(2_000_000), 0);

        assert!(bounds.contains(Money::from_major(1_000_000)));
        assert!(bounds.contains(Money::from_major(2_000_000)));
        assert!(!bounds.contains(Money::from_major(999_999)));
        assert!(!bounds.contains(Money::from_major(2_000_001)));
    }
}
