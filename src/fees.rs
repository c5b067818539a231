use crate::config::FeeSchedule;
use crate::decimal::Money;

/// fee assessment for one settlement attempt
#[derive(Debug, Clone, PartialEq)]
pub struct FeeAssessment {
    /// flat fee charged regardless of instalment size
    pub fee: Money,
    /// prior-payment count the assessment was made for
    pub payment_count: u32,
    /// min_count of the tier that applied
    pub tier_min_count: u32,
}

/// maps the prior-payment count to a flat settlement fee
pub struct FeeScheduleEngine {
    pub schedule: FeeSchedule,
}

impl FeeScheduleEngine {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    /// fee charged for the next attempt given prior accepted payments
    ///
    /// tiers are ordered by min_count; the highest tier at or below the
    /// count applies, so the schedule saturates at its last tier.
    pub fn fee_for(&self, payment_count: u32) -> FeeAssessment {
        let tier = self
            .schedule
            .tiers
            .iter()
            .take_while(|tier| tier.min_count <= payment_count)
            .last()
            .or_else(|| self.schedule.tiers.first());

        match tier {
            Some(tier) => FeeAssessment {
                fee: tier.fee,
                payment_count,
                tier_min_count: tier.min_count,
            },
            None => FeeAssessment {
                fee: Money::ZERO,
                payment_count,
                tier_min_count: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tiers() {
        let engine = FeeScheduleEngine::new(FeeSchedule::standard());

        assert_eq!(engine.fee_for(0).fee, Money::from_major(200_000));
        assert_eq!(engine.fee_for(1).fee, Money::from_major(500_000));
        assert_eq!(engine.fee_for(2).fee, Money::from_major(1_000_000));
    }

    #[test]
    fn test_fee_sequence_is_non_decreasing_and_capped() {
        let engine = FeeScheduleEngine::new(FeeSchedule::standard());
        let cap = Money::from_major(1_000_000);

        let mut previous = Money::ZERO;
        for count in 0..10 {
            let assessment = engine.fee_for(count);
            assert!(assessment.fee >= previous);
            assert!(assessment.fee <= cap);
            previous = assessment.fee;
        }
        assert_eq!(engine.fee_for(9).fee, cap);
    }

    #[test]
    fn test_assessment_reports_applied_tier() {
        let engine = FeeScheduleEngine::new(FeeSchedule::standard());

        let assessment = engine.fee_for(5);
        assert_eq!(assessment.payment_count, 5);
        assert_eq!(assessment.tier_min_count, 2);
    }
}
