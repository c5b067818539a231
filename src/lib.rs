pub mod bounds;
pub mod composer;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fees;
pub mod interest;
pub mod types;
pub mod verify;

// re-export key types
pub use bounds::{BoundsCalculator, PaymentBounds};
pub use composer::{PartialPaymentRequest, SettlementComposer, SettlementQuote};
pub use config::{
    BoundsPolicy, CooldownConfig, FeeSchedule, FeeTier, InterestConfig, SettlementConfig,
    UnknownDatePolicy,
};
pub use decimal::{Money, Rate};
pub use eligibility::{parse_payment_date, EligibilityGate, EligibilityStatus, ParsedPaymentDate};
pub use engine::{
    DispatchOutcome, GatewayDispatcher, PaymentCountProvider, SettlementEngine,
    SettlementOutcome, CASH_SETTLEMENT_NOTE,
};
pub use errors::{Result, SettlementError};
pub use events::{Event, EventStore};
pub use fees::{FeeAssessment, FeeScheduleEngine};
pub use interest::{InterestAccrual, OverdueInterestEngine};
pub use types::{Bill, BillId, PaymentMethod};
pub use verify::{SettlementVerifier, VerificationPolicy};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
