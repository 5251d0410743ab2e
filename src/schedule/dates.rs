use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Installment;
use crate::errors::{Result, ScheduleError};

/// Latest day of month an installment can fall on. Every month has it, so
/// stepping never needs month-length arithmetic; dates started on the
/// 29th-31st drift to the 28th.
pub const MAX_INSTALLMENT_DAY: u32 = 28;

/// Yields one date per installment, each one calendar month after the
/// previous, starting one month after `start`.
#[derive(Debug, Clone)]
pub struct InstallmentDateSequencer {
    current: NaiveDate,
}

impl InstallmentDateSequencer {
    pub fn new(start: NaiveDate) -> Self {
        Self { current: start }
    }
}

impl Iterator for InstallmentDateSequencer {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let (year, month) = if self.current.month() == 12 {
            (self.current.year().checked_add(1)?, 1)
        } else {
            (self.current.year(), self.current.month() + 1)
        };
        let day = self.current.day().min(MAX_INSTALLMENT_DAY);

        self.current = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(self.current)
    }
}

/// exactly `count` installment dates after `start`
pub fn installment_dates(start: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
    let dates: Vec<NaiveDate> = InstallmentDateSequencer::new(start).take(count).collect();
    if dates.len() < count {
        return Err(ScheduleError::InvalidDate {
            message: format!("cannot step {} months past {}", count, start),
        });
    }
    Ok(dates)
}

/// installment with its due date attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedInstallment {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub installment: Installment,
}
