use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// Constant periodic payment that amortizes `balance` over `remaining_periods`
/// monthly installments at `annual_rate`.
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual / 12`, or the
/// straight-line `P / n` when the rate is zero.
pub fn annuity_payment(balance: Money, annual_rate: Rate, remaining_periods: u32) -> Result<Money> {
    if !balance.is_positive() {
        return Err(ScheduleError::invalid_input(format!(
            "balance must be positive, got {}",
            balance
        )));
    }
    if remaining_periods == 0 {
        return Err(ScheduleError::invalid_input("remaining periods must be positive"));
    }
    if annual_rate.is_negative() {
        return Err(ScheduleError::invalid_input(format!(
            "interest rate must not be negative, got {}",
            annual_rate
        )));
    }

    let r = annual_rate.monthly_rate();
    if r.is_zero() {
        return Ok(balance / Decimal::from(remaining_periods));
    }

    let compound = compound_factor(r, remaining_periods)?;
    let numerator = balance
        .as_decimal()
        .checked_mul(r)
        .and_then(|x| x.checked_mul(compound))
        .ok_or_else(|| overflow(remaining_periods))?;
    let denominator = compound - Decimal::ONE;

    numerator
        .checked_div(denominator)
        .map(Money::from_decimal)
        .ok_or_else(|| overflow(remaining_periods))
}

/// `(1 + r)^n` by repeated checked multiplication
fn compound_factor(r: Decimal, n: u32) -> Result<Decimal> {
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..n {
        compound = compound.checked_mul(base).ok_or_else(|| overflow(n))?;
    }
    Ok(compound)
}

fn overflow(periods: u32) -> ScheduleError {
    ScheduleError::CalculationError {
        message: format!("compounding over {} periods overflows decimal range", periods),
    }
}
