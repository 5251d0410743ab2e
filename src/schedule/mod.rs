pub mod annuity;
pub mod dates;
pub mod generator;
pub mod overpayment;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::rates::{RateChange, RateSchedule};

pub use annuity::annuity_payment;
pub use dates::{installment_dates, DatedInstallment, InstallmentDateSequencer};
pub use generator::ScheduleGenerator;
pub use overpayment::OverpaymentPolicy;

/// One period of a schedule. Amounts are rounded half-up to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub installment_number: u32,
    /// annual rate in percent
    pub interest_rate: Decimal,
    /// balance entering the period
    pub current_debt: Money,
    /// scheduled payment, overpayment excluded
    pub installment_amount: Money,
    pub capital_payment: Money,
    pub interest_payment: Money,
    pub overpayment: Money,
    /// balance after capital and overpayment
    pub remaining_capital: Money,
}

impl Installment {
    /// principal repaid this period, overpayment included
    pub fn total_capital(&self) -> Money {
        self.capital_payment + self.overpayment
    }

    /// everything the borrower pays this period
    pub fn total_payment(&self) -> Money {
        self.installment_amount + self.overpayment
    }
}

/// installments in chronological order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    installments: Vec<Installment>,
}

impl Schedule {
    pub fn new(installments: Vec<Installment>) -> Self {
        Self { installments }
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installment> {
        self.installments.iter()
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// installment by 1-based number
    pub fn get(&self, installment_number: u32) -> Option<&Installment> {
        let index = installment_number.checked_sub(1)? as usize;
        self.installments.get(index)
    }

    pub fn first(&self) -> Option<&Installment> {
        self.installments.first()
    }

    pub fn last(&self) -> Option<&Installment> {
        self.installments.last()
    }

    pub fn total_interest(&self) -> Money {
        self.iter().map(|i| i.interest_payment).sum()
    }

    /// scheduled capital, overpayments excluded
    pub fn total_capital(&self) -> Money {
        self.iter().map(|i| i.capital_payment).sum()
    }

    pub fn total_overpayment(&self) -> Money {
        self.iter().map(|i| i.overpayment).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.iter().map(Installment::total_payment).sum()
    }

    /// remaining capital after the last installment
    pub fn final_balance(&self) -> Money {
        self.last().map(|i| i.remaining_capital).unwrap_or(Money::ZERO)
    }

    /// attach due dates, the first one month after `start`
    pub fn with_dates(&self, start: NaiveDate) -> Result<Vec<DatedInstallment>> {
        let dates = installment_dates(start, self.len())?;
        Ok(dates
            .into_iter()
            .zip(self.iter().cloned())
            .map(|(date, installment)| DatedInstallment { date, installment })
            .collect())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Installment;
    type IntoIter = std::slice::Iter<'a, Installment>;

    fn into_iter(self) -> Self::IntoIter {
        self.installments.iter()
    }
}

/// fixed monthly installment for a whole-term annuity
pub fn compute_standard_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Money> {
    annuity_payment(principal, annual_rate, term_months)
}

pub fn generate_schedule_no_overpayment(
    principal: Money,
    rate_changes: &[RateChange],
    term_months: u32,
    additional_costs: Money,
) -> Result<Schedule> {
    generate(principal, rate_changes, term_months, additional_costs, OverpaymentPolicy::None)
}

pub fn generate_schedule_fixed_overpayment(
    principal: Money,
    rate_changes: &[RateChange],
    term_months: u32,
    fixed_overpayment: Money,
    additional_costs: Money,
) -> Result<Schedule> {
    generate(
        principal,
        rate_changes,
        term_months,
        additional_costs,
        OverpaymentPolicy::FixedAmount(fixed_overpayment),
    )
}

pub fn generate_schedule_mix_strategy(
    principal: Money,
    rate_changes: &[RateChange],
    term_months: u32,
    total_monthly_payment: Money,
    additional_costs: Money,
) -> Result<Schedule> {
    generate(
        principal,
        rate_changes,
        term_months,
        additional_costs,
        OverpaymentPolicy::TotalPaymentTarget(total_monthly_payment),
    )
}

fn generate(
    principal: Money,
    rate_changes: &[RateChange],
    term_months: u32,
    additional_costs: Money,
    policy: OverpaymentPolicy,
) -> Result<Schedule> {
    let rates = RateSchedule::new(rate_changes.to_vec())?;
    let terms = LoanTerms::new(principal, rates, term_months, additional_costs)?;
    ScheduleGenerator::new(policy).generate(&terms)
}
