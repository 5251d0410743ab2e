use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("invalid strategy amount: standard payment {standard_payment}, provided {provided}")]
    InvalidStrategyAmount {
        standard_payment: Money,
        provided: Money,
    },

    #[error("malformed rate schedule: {message}")]
    MalformedRateSchedule {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_rates(message: impl Into<String>) -> Self {
        ScheduleError::MalformedRateSchedule {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
