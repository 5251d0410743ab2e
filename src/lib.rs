pub mod config;
pub mod decimal;
pub mod errors;
pub mod plan;
pub mod rates;
pub mod savings;
pub mod schedule;

// re-export key types
pub use config::{LoanTerms, LoanTermsBuilder};
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use plan::RepaymentPlan;
pub use rates::{MonthlyRateVector, RateChange, RateSchedule};
pub use savings::{compare_savings, cumulative_savings, CumulativeSavingsPoint, SavingsReport};
pub use schedule::{
    annuity_payment, compute_standard_payment, generate_schedule_fixed_overpayment,
    generate_schedule_mix_strategy, generate_schedule_no_overpayment, installment_dates,
    DatedInstallment, Installment, InstallmentDateSequencer, OverpaymentPolicy, Schedule,
    ScheduleGenerator,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
