pub mod table;

use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{Result, ScheduleError};

pub use table::MonthlyRateVector;

/// annual nominal rate effective from a given installment onward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateChange {
    /// 1-based installment number the rate applies from
    pub effective_month: u32,
    pub annual_rate: Rate,
}

impl RateChange {
    pub fn new(effective_month: u32, annual_rate: Rate) -> Self {
        Self {
            effective_month,
            annual_rate,
        }
    }
}

/// Validated, sparse list of rate changes.
///
/// Always non-empty, starts at month 1, strictly ascending by month and free
/// of negative rates. Changes past the loan term are kept and simply never
/// reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RateChange>", into = "Vec<RateChange>")]
pub struct RateSchedule {
    changes: Vec<RateChange>,
}

impl RateSchedule {
    /// validate a caller-supplied list without altering it
    pub fn new(changes: Vec<RateChange>) -> Result<Self> {
        let first = changes
            .first()
            .ok_or_else(|| ScheduleError::malformed_rates("rate change list is empty"))?;

        if first.effective_month != 1 {
            return Err(ScheduleError::malformed_rates(format!(
                "first rate change must apply from month 1, got month {}",
                first.effective_month
            )));
        }

        for pair in changes.windows(2) {
            if pair[1].effective_month <= pair[0].effective_month {
                return Err(ScheduleError::malformed_rates(format!(
                    "rate changes must be strictly ascending by month: {} follows {}",
                    pair[1].effective_month, pair[0].effective_month
                )));
            }
        }

        if let Some(negative) = changes.iter().find(|c| c.annual_rate.is_negative()) {
            return Err(ScheduleError::invalid_input(format!(
                "negative interest rate {} from month {}",
                negative.annual_rate, negative.effective_month
            )));
        }

        Ok(Self { changes })
    }

    /// single rate for the whole term
    pub fn flat(annual_rate: Rate) -> Result<Self> {
        Self::new(vec![RateChange::new(1, annual_rate)])
    }

    /// Explicit normalization: prepend a month-1 entry at `base_rate` when the
    /// list is empty or starts later than month 1, then validate.
    pub fn with_base_rate(base_rate: Rate, mut changes: Vec<RateChange>) -> Result<Self> {
        let starts_at_one = changes.first().map(|c| c.effective_month == 1).unwrap_or(false);
        if !starts_at_one {
            changes.insert(0, RateChange::new(1, base_rate));
        }
        Self::new(changes)
    }

    /// rate in force for month 1
    pub fn initial_rate(&self) -> Rate {
        self.changes[0].annual_rate
    }

    pub fn changes(&self) -> &[RateChange] {
        &self.changes
    }
}

impl TryFrom<Vec<RateChange>> for RateSchedule {
    type Error = ScheduleError;

    fn try_from(changes: Vec<RateChange>) -> Result<Self> {
        RateSchedule::new(changes)
    }
}

impl From<RateSchedule> for Vec<RateChange> {
    fn from(schedule: RateSchedule) -> Self {
        schedule.changes
    }
}
