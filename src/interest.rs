use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::InterestConfig;
use crate::decimal::Money;

/// overdue interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestAccrual {
    /// interest owed, rounded to the whole currency unit
    pub interest_amount: Money,
    /// fixed-length months elapsed past the due date
    pub overdue_months: u32,
    /// post-payment remainder the interest was computed on
    pub remaining_base: Money,
    /// true when the cap clipped the raw interest
    pub cap_applied: bool,
}

/// engine for overdue interest on the post-payment remainder
pub struct OverdueInterestEngine {
    pub config: InterestConfig,
}

impl OverdueInterestEngine {
    pub fn new(config: InterestConfig) -> Self {
        Self { config }
    }

    /// months elapsed past the due date, counted in fixed average-length
    /// months rather than calendar months
    pub fn overdue_months(&self, due_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        if now <= due_date {
            return 0;
        }

        let elapsed_days = Decimal::from((now - due_date).num_seconds()) / dec!(86400);
        (elapsed_days / self.config.average_month_days)
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX)
    }

    /// interest owed on what remains after the proposed instalment
    ///
    /// raw interest is monthly_rate x months on the remainder, clipped to
    /// maximum_ratio of the remainder. must be re-run on every change of
    /// the proposed amount and on every bill refresh.
    pub fn accrue(
        &self,
        outstanding: Money,
        proposed: Money,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> InterestAccrual {
        let remaining = (outstanding - proposed).max(Money::ZERO);
        let months = self.overdue_months(due_date, now);

        let raw = remaining.as_decimal()
            * self.config.monthly_rate.as_decimal()
            * Decimal::from(months);
        let cap = remaining.as_decimal() * self.config.maximum_ratio.as_decimal();

        InterestAccrual {
            interest_amount: Money::from_decimal(raw.min(cap)).round_whole(),
            overdue_months: months,
            remaining_base: remaining,
            cap_applied: raw > cap,
        }
    }
}
