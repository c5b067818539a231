use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::{CooldownConfig, UnknownDatePolicy};
use crate::types::Bill;

/// fixed timestamp pattern the ledger service writes most of the time
const LEDGER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// parse outcome for a last-payment timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedPaymentDate {
    Known(DateTime<Utc>),
    Unknown,
}

/// ordered parser chain for the last-payment timestamp
///
/// tries the ledger's fixed pattern first, then RFC 3339, then a bare
/// date. anything else is Unknown rather than an error.
pub fn parse_payment_date(raw: &str) -> ParsedPaymentDate {
    let trimmed = raw.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, LEDGER_TIMESTAMP_FORMAT) {
        return ParsedPaymentDate::Known(Utc.from_utc_datetime(&naive));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return ParsedPaymentDate::Known(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return ParsedPaymentDate::Known(Utc.from_utc_datetime(&naive));
        }
    }

    ParsedPaymentDate::Unknown
}

/// eligibility decision for the next partial payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityStatus {
    pub eligible: bool,
    /// whole days since the last partial payment, when the date is known
    pub days_since_last_payment: Option<u32>,
    /// days until the next payment becomes allowed
    pub remaining_days: u32,
    /// true when the last-payment timestamp could not be parsed
    pub date_unknown: bool,
}

impl EligibilityStatus {
    fn granted() -> Self {
        Self {
            eligible: true,
            days_since_last_payment: None,
            remaining_days: 0,
            date_unknown: false,
        }
    }
}

/// enforces the minimum interval between consecutive partial payments
pub struct EligibilityGate {
    pub config: CooldownConfig,
}

impl EligibilityGate {
    pub fn new(config: CooldownConfig) -> Self {
        Self { config }
    }

    /// decide whether the tenant may make another partial payment now
    pub fn check(&self, bill: &Bill, now: DateTime<Utc>) -> EligibilityStatus {
        if !bill.is_partially_paid {
            return EligibilityStatus::granted();
        }
        let raw = match &bill.last_payment_date {
            Some(raw) => raw,
            None => return EligibilityStatus::granted(),
        };

        let last_payment = match parse_payment_date(raw) {
            ParsedPaymentDate::Known(dt) => dt,
            ParsedPaymentDate::Unknown => {
                return match self.config.unknown_date_policy {
                    UnknownDatePolicy::AssumeEligible => EligibilityStatus {
                        date_unknown: true,
                        ..EligibilityStatus::granted()
                    },
                    UnknownDatePolicy::AssumeIneligible => EligibilityStatus {
                        eligible: false,
                        days_since_last_payment: None,
                        remaining_days: self.config.minimum_interval_days,
                        date_unknown: true,
                    },
                };
            }
        };

        let days_since = (now - last_payment).num_days().max(0) as u32;
        let interval = self.config.minimum_interval_days;

        EligibilityStatus {
            eligible: days_since >= interval,
            days_since_last_payment: Some(days_since),
            remaining_days: interval.saturating_sub(days_since),
            date_unknown: false,
        }
    }
}
