use rust_decimal::RoundingStrategy;
use tracing::{debug, trace};

use super::annuity::annuity_payment;
use super::overpayment::OverpaymentPolicy;
use super::{Installment, Schedule};
use crate::config::LoanTerms;
use crate::decimal::{Money, CENTS_DP};
use crate::errors::{Result, ScheduleError};
use crate::rates::MonthlyRateVector;

/// Month-by-month annuity schedule generator.
///
/// All three repayment strategies run through the same per-period step and
/// differ only in the [`OverpaymentPolicy`]. The installment is re-amortized
/// every period over the remaining term, so overpayments and rate changes
/// feed straight into the next installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleGenerator {
    policy: OverpaymentPolicy,
}

/// accumulator threaded through the generation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PeriodState {
    balance: Money,
    next_installment: u32,
}

impl PeriodState {
    fn opening(balance: Money) -> Self {
        Self {
            balance,
            next_installment: 1,
        }
    }

    fn is_closed(&self) -> bool {
        !self.balance.is_positive()
    }
}

impl ScheduleGenerator {
    pub fn new(policy: OverpaymentPolicy) -> Self {
        Self { policy }
    }

    pub fn no_overpayment() -> Self {
        Self::new(OverpaymentPolicy::None)
    }

    pub fn fixed_overpayment(amount: Money) -> Self {
        Self::new(OverpaymentPolicy::FixedAmount(amount))
    }

    pub fn mix_strategy(total_monthly_payment: Money) -> Self {
        Self::new(OverpaymentPolicy::TotalPaymentTarget(total_monthly_payment))
    }

    pub fn policy(&self) -> OverpaymentPolicy {
        self.policy
    }

    /// Generate the full schedule, or fail before the first period.
    ///
    /// Stops after the period that brings the balance to zero, or silently
    /// at the end of the term when the strategy never gets there.
    pub fn generate(&self, terms: &LoanTerms) -> Result<Schedule> {
        terms.validate()?;
        self.policy.validate()?;
        self.check_payment_target(terms)?;

        let term = terms.term_months;
        let rates = MonthlyRateVector::build(&terms.rate_schedule, term);

        debug!(
            policy = %self.policy,
            financed = %terms.financed_amount(),
            term,
            rate_changes = terms.rate_schedule.changes().len(),
            "generating schedule"
        );

        let mut state = PeriodState::opening(terms.financed_amount());
        let mut installments = Vec::with_capacity(term as usize);

        while !state.is_closed() && state.next_installment <= term {
            let (installment, next) = self.step(state, &rates, term)?;
            installments.push(installment);
            state = next;
        }

        if !state.is_closed() {
            debug!(
                outstanding = %state.balance,
                "term reached with principal outstanding"
            );
        }

        debug!(installments = installments.len(), "schedule generated");
        Ok(Schedule::new(installments))
    }

    /// mix strategy must pay more than the period-1 standard installment
    fn check_payment_target(&self, terms: &LoanTerms) -> Result<()> {
        if let OverpaymentPolicy::TotalPaymentTarget(total) = self.policy {
            let standard_payment = terms.standard_payment()?;
            if total <= standard_payment {
                return Err(ScheduleError::InvalidStrategyAmount {
                    standard_payment,
                    provided: total,
                });
            }
        }
        Ok(())
    }

    /// one period: consumes the state, yields the record and the next state
    fn step(
        &self,
        state: PeriodState,
        rates: &MonthlyRateVector,
        term: u32,
    ) -> Result<(Installment, PeriodState)> {
        let number = state.next_installment;
        let annual_rate = rates
            .annual_rate(number)
            .ok_or_else(|| ScheduleError::CalculationError {
                message: format!("no rate for installment {} of {}", number, term),
            })?;
        let monthly_rate = annual_rate.monthly_rate();
        let remaining_periods = term - number + 1;

        let mut installment_amount = annuity_payment(state.balance, annual_rate, remaining_periods)?;
        let interest_payment = state.balance * monthly_rate;
        let mut capital_payment = installment_amount - interest_payment;

        // closing period
        if state.balance < capital_payment {
            capital_payment = state.balance;
            installment_amount = capital_payment + interest_payment;
        }

        let overpayment = self
            .policy
            .overpayment(installment_amount, state.balance - capital_payment);
        let remaining = state.balance - (capital_payment + overpayment);

        trace!(
            installment = number,
            rate = %annual_rate,
            balance = %state.balance,
            payment = %installment_amount,
            overpayment = %overpayment,
            "period"
        );

        let installment = Installment {
            installment_number: number,
            interest_rate: annual_rate
                .as_percentage()
                .round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero),
            current_debt: state.balance.round_cents(),
            installment_amount: installment_amount.round_cents(),
            capital_payment: capital_payment.round_cents(),
            interest_payment: interest_payment.round_cents(),
            overpayment: overpayment.round_cents(),
            remaining_capital: remaining.round_cents(),
        };

        let next = PeriodState {
            balance: remaining,
            next_installment: number + 1,
        };

        Ok((installment, next))
    }
}
