use super::RateSchedule;
use crate::decimal::Rate;

/// Per-period rate table, one entry per installment of the term.
///
/// Built once per schedule run by a single forward sweep over the sparse
/// [`RateSchedule`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRateVector {
    periods: Vec<Rate>,
}

impl MonthlyRateVector {
    pub fn build(schedule: &RateSchedule, term_months: u32) -> Self {
        let changes = schedule.changes();
        let mut periods = Vec::with_capacity(term_months as usize);
        let mut index = 0;

        for month in 1..=term_months {
            while index + 1 < changes.len() && changes[index + 1].effective_month <= month {
                index += 1;
            }
            periods.push(changes[index].annual_rate);
        }

        Self { periods }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// annual rate in force for a 1-based installment number
    pub fn annual_rate(&self, installment_number: u32) -> Option<Rate> {
        let index = installment_number.checked_sub(1)? as usize;
        self.periods.get(index).copied()
    }
}
