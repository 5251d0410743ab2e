use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};

/// how much extra principal goes in each period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// scheduled installment only
    None,
    /// constant extra principal every period
    FixedAmount(Money),
    /// constant total outlay; the overpayment is whatever the recomputed
    /// installment leaves over
    TotalPaymentTarget(Money),
}

impl OverpaymentPolicy {
    /// Overpayment for one period.
    ///
    /// `headroom` is the balance left once the scheduled capital portion is
    /// paid; the result always lies in `[0, headroom]`.
    pub fn overpayment(&self, installment_amount: Money, headroom: Money) -> Money {
        let ceiling = headroom.max(Money::ZERO);
        match self {
            OverpaymentPolicy::None => Money::ZERO,
            OverpaymentPolicy::FixedAmount(amount) => amount.clamp_between(Money::ZERO, ceiling),
            OverpaymentPolicy::TotalPaymentTarget(total) => {
                (*total - installment_amount).clamp_between(Money::ZERO, ceiling)
            }
        }
    }

    /// Amount checks that do not depend on the loan. The mix-strategy
    /// comparison against the standard installment lives in the generator.
    pub fn validate(&self) -> Result<()> {
        match self {
            OverpaymentPolicy::FixedAmount(amount) if amount.is_negative() => {
                Err(ScheduleError::invalid_input(format!(
                    "fixed overpayment must not be negative, got {}",
                    amount
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for OverpaymentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverpaymentPolicy::None => write!(f, "no overpayment"),
            OverpaymentPolicy::FixedAmount(amount) => write!(f, "fixed overpayment {}", amount),
            OverpaymentPolicy::TotalPaymentTarget(total) => write!(f, "mix strategy {}", total),
        }
    }
}
