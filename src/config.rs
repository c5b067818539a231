use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SettlementError};
use crate::types::PaymentMethod;

/// settlement configuration for one front-end flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementConfig {
    pub payment_method: PaymentMethod,
    pub bounds_policy: BoundsPolicy,
    pub fee_schedule: FeeSchedule,
    pub interest_config: InterestConfig,
    pub cooldown_config: CooldownConfig,
}

/// instalment window policy for a partial payment attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsPolicy {
    /// fraction of the outstanding balance every attempt must at least cover
    pub minimum_ratio: Rate,
    /// cap applied to the first attempt on a bill
    pub first_attempt_max_ratio: Rate,
    /// cap applied from the second attempt on
    pub subsequent_max_ratio: Rate,
}

impl BoundsPolicy {
    /// first attempt capped at 80% of the outstanding balance
    pub fn conservative_first() -> Self {
        Self {
            minimum_ratio: Rate::from_decimal(dec!(0.5)),
            first_attempt_max_ratio: Rate::from_decimal(dec!(0.8)),
            subsequent_max_ratio: Rate::ONE,
        }
    }

    /// full payoff allowed from the first attempt
    pub fn full() -> Self {
        Self {
            minimum_ratio: Rate::from_decimal(dec!(0.5)),
            first_attempt_max_ratio: Rate::ONE,
            subsequent_max_ratio: Rate::ONE,
        }
    }

    /// maximum-bound ratio for the given prior-payment count
    pub fn max_ratio_for(&self, payment_count: u32) -> Rate {
        if payment_count == 0 {
            self.first_attempt_max_ratio
        } else {
            self.subsequent_max_ratio
        }
    }
}

/// one step of the settlement fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    /// prior-payment count at which this tier starts
    pub min_count: u32,
    pub fee: Money,
}

/// flat per-attempt fee schedule, tiered by prior payment count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// tiers ordered by min_count; the highest applicable tier wins
    pub tiers: Vec<FeeTier>,
}

impl FeeSchedule {
    /// standard schedule: 200k for the first attempt, 500k for the
    /// second, 1m from the third on
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                FeeTier { min_count: 0, fee: Money::from_major(200_000) },
                FeeTier { min_count: 1, fee: Money::from_major(500_000) },
                FeeTier { min_count: 2, fee: Money::from_major(1_000_000) },
            ],
        }
    }
}

/// overdue interest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestConfig {
    /// monthly rate applied to the post-payment remainder
    pub monthly_rate: Rate,
    /// interest cap as a fraction of the post-payment remainder
    pub maximum_ratio: Rate,
    /// fixed average month length in days used to count overdue months
    pub average_month_days: Decimal,
}

impl InterestConfig {
    /// 2% per month, capped at 5% of the remainder
    pub fn standard() -> Self {
        Self {
            monthly_rate: Rate::from_decimal(dec!(0.02)),
            maximum_ratio: Rate::from_decimal(dec!(0.05)),
            average_month_days: dec!(30.44),
        }
    }
}

/// what to assume when the last-payment timestamp cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownDatePolicy {
    /// grant eligibility when the date is unknown
    AssumeEligible,
    /// withhold eligibility for the full interval when the date is unknown
    AssumeIneligible,
}

/// cool-down configuration between consecutive partial payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// minimum days between consecutive partial payments on one bill
    pub minimum_interval_days: u32,
    pub unknown_date_policy: UnknownDatePolicy,
}

impl CooldownConfig {
    /// 30-day interval, unknown dates treated as eligible
    pub fn standard() -> Self {
        Self {
            minimum_interval_days: 30,
            unknown_date_policy: UnknownDatePolicy::AssumeEligible,
        }
    }
}

impl SettlementConfig {
    /// self-service online-gateway flow
    pub fn online_gateway() -> Self {
        Self {
            payment_method: PaymentMethod::OnlineGateway,
            bounds_policy: BoundsPolicy::full(),
            fee_schedule: FeeSchedule::standard(),
            interest_config: InterestConfig::standard(),
            cooldown_config: CooldownConfig::standard(),
        }
    }

    /// landlord-mediated cash confirmation flow
    pub fn cash_confirmation() -> Self {
        Self {
            payment_method: PaymentMethod::Cash,
            bounds_policy: BoundsPolicy::conservative_first(),
            fee_schedule: FeeSchedule::standard(),
            interest_config: InterestConfig::standard(),
            cooldown_config: CooldownConfig::standard(),
        }
    }

    /// unified policy for both flows: the conservative first-attempt cap
    pub fn unified(payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            bounds_policy: BoundsPolicy::conservative_first(),
            fee_schedule: FeeSchedule::standard(),
            interest_config: InterestConfig::standard(),
            cooldown_config: CooldownConfig::standard(),
        }
    }

    /// check internal consistency of the configuration
    pub fn validate(&self) -> Result<()> {
        let bounds = &self.bounds_policy;
        if bounds.minimum_ratio.as_decimal() <= Decimal::ZERO {
            return Err(SettlementError::InvalidConfiguration {
                message: "minimum ratio must be positive".to_string(),
            });
        }
        if bounds.minimum_ratio > bounds.first_attempt_max_ratio
            || bounds.minimum_ratio > bounds.subsequent_max_ratio
        {
            return Err(SettlementError::InvalidConfiguration {
                message: "minimum ratio exceeds a maximum ratio".to_string(),
            });
        }

        if self.fee_schedule.tiers.is_empty() {
            return Err(SettlementError::InvalidConfiguration {
                message: "fee schedule has no tiers".to_string(),
            });
        }
        for pair in self.fee_schedule.tiers.windows(2) {
            if pair[1].min_count <= pair[0].min_count {
                return Err(SettlementError::InvalidConfiguration {
                    message: "fee tiers must be ordered by ascending count".to_string(),
                });
            }
            if pair[1].fee < pair[0].fee {
                return Err(SettlementError::InvalidConfiguration {
                    message: "fee tiers must be non-decreasing".to_string(),
                });
            }
        }
        if self.fee_schedule.tiers[0].min_count != 0 {
            return Err(SettlementError::InvalidConfiguration {
                message: "fee schedule must cover the first attempt".to_string(),
            });
        }

        let interest = &self.interest_config;
        if interest.monthly_rate.as_decimal().is_sign_negative()
            || interest.maximum_ratio.as_decimal().is_sign_negative()
        {
            return Err(SettlementError::InvalidConfiguration {
                message: "interest rates must not be negative".to_string(),
            });
        }
        if interest.average_month_days <= Decimal::ZERO {
            return Err(SettlementError::InvalidConfiguration {
                message: "average month length must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_configs_are_valid() {
        assert!(SettlementConfig::online_gateway().validate().is_ok());
        assert!(SettlementConfig::cash_confirmation().validate().is_ok());
        assert!(SettlementConfig::unified(PaymentMethod::Cash).validate().is_ok());
    }

    #[test]
    fn test_flow_policies_diverge_only_on_first_attempt() {
        let cash = SettlementConfig::cash_confirmation();
        let online = SettlementConfig::online_gateway();

        assert_eq!(
            cash.bounds_policy.max_ratio_for(0),
            Rate::from_decimal(dec!(0.8))
        );
        assert_eq!(online.bounds_policy.max_ratio_for(0), Rate::ONE);
        assert_eq!(cash.bounds_policy.max_ratio_for(1), Rate::ONE);
        assert_eq!(online.bounds_policy.max_ratio_for(1), Rate::ONE);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = SettlementConfig::online_gateway();
        config.bounds_policy.minimum_ratio = Rate::from_decimal(dec!(0.9));
        config.bounds_policy.first_attempt_max_ratio = Rate::from_decimal(dec!(0.8));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_decreasing_fees() {
        let mut config = SettlementConfig::online_gateway();
        config.fee_schedule.tiers[2].fee = Money::from_major(100_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_gap_before_first_attempt() {
        let mut config = SettlementConfig::online_gateway();
        config.fee_schedule.tiers.remove(0);
        assert!(config.validate().is_err());
    }
}
