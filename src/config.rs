use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::rates::{RateChange, RateSchedule};
use crate::schedule::annuity::annuity_payment;

pub const DEFAULT_CURRENCY: &str = "PLN";

/// longest accepted term, 100 years
pub const MAX_TERM_MONTHS: u32 = 1200;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// loan terms, immutable once a schedule run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub rate_schedule: RateSchedule,
    pub term_months: u32,
    /// commissions, insurance and similar, financed together with the principal
    #[serde(default)]
    pub additional_costs: Money,
    /// display label only, no conversion happens anywhere
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        rate_schedule: RateSchedule,
        term_months: u32,
        additional_costs: Money,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            rate_schedule,
            term_months,
            additional_costs,
            currency: default_currency(),
        };
        terms.validate()?;
        Ok(terms)
    }

    /// builder for loan terms
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// Reject non-positive principal, a term outside `1..=MAX_TERM_MONTHS`
    /// and negative costs. Fields are public, so generators call this again
    /// before every run.
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(ScheduleError::invalid_input(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.term_months == 0 {
            return Err(ScheduleError::invalid_input("term must be at least one month"));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(ScheduleError::invalid_input(format!(
                "term of {} months exceeds the maximum of {}",
                self.term_months, MAX_TERM_MONTHS
            )));
        }
        if self.additional_costs.is_negative() {
            return Err(ScheduleError::invalid_input(format!(
                "additional costs must not be negative, got {}",
                self.additional_costs
            )));
        }
        Ok(())
    }

    /// principal plus additional costs, the balance entering month 1
    pub fn financed_amount(&self) -> Money {
        self.principal + self.additional_costs
    }

    /// rate in force for the first installment
    pub fn initial_rate(&self) -> Rate {
        self.rate_schedule.initial_rate()
    }

    /// period-1 annuity installment over the full term at the month-1 rate
    pub fn standard_payment(&self) -> Result<Money> {
        annuity_payment(self.financed_amount(), self.initial_rate(), self.term_months)
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let terms: LoanTerms = serde_json::from_str(json).map_err(|e| ScheduleError::InvalidInput {
            message: format!("unreadable loan terms: {}", e),
        })?;
        terms.validate()?;
        Ok(terms)
    }
}

/// builder for loan terms
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    base_rate: Option<Rate>,
    rate_changes: Vec<RateChange>,
    term_months: Option<u32>,
    overflowing_years: Option<u32>,
    additional_costs: Money,
    currency: String,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self {
            principal: None,
            base_rate: None,
            rate_changes: Vec::new(),
            term_months: None,
            overflowing_years: None,
            additional_costs: Money::ZERO,
            currency: default_currency(),
        }
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Rate from month 1. When rate changes are also given and none of them
    /// starts at month 1, this rate fills the gap.
    pub fn rate(mut self, annual_rate: Rate) -> Self {
        self.base_rate = Some(annual_rate);
        self
    }

    pub fn rate_change(mut self, effective_month: u32, annual_rate: Rate) -> Self {
        self.rate_changes.push(RateChange::new(effective_month, annual_rate));
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self.overflowing_years = None;
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        match years.checked_mul(12) {
            Some(months) => self.term_months(months),
            None => {
                self.overflowing_years = Some(years);
                self
            }
        }
    }

    pub fn additional_costs(mut self, costs: Money) -> Self {
        self.additional_costs = costs;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        if let Some(years) = self.overflowing_years {
            return Err(ScheduleError::invalid_input(format!(
                "term of {} years is out of range",
                years
            )));
        }
        let principal = self
            .principal
            .ok_or_else(|| ScheduleError::invalid_input("principal is required"))?;
        let term_months = self
            .term_months
            .ok_or_else(|| ScheduleError::invalid_input("term is required"))?;

        let rate_schedule = match self.base_rate {
            Some(base) => RateSchedule::with_base_rate(base, self.rate_changes)?,
            None => RateSchedule::new(self.rate_changes)?,
        };

        let mut terms = LoanTerms::new(principal, rate_schedule, term_months, self.additional_costs)?;
        terms.currency = self.currency;
        Ok(terms)
    }
}

impl Default for LoanTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_defaults() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(300_000))
            .rate(Rate::from_percentage(dec!(7.5)))
            .term_years(25)
            .build()
            .unwrap();

        assert_eq!(terms.term_months, 300);
        assert_eq!(terms.additional_costs, Money::ZERO);
        assert_eq!(terms.currency, "PLN");
        assert_eq!(terms.rate_schedule.changes().len(), 1);
    }

    #[test]
    fn test_builder_with_rate_changes() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(200_000))
            .rate(Rate::from_percentage(dec!(7)))
            .rate_change(25, Rate::from_percentage(dec!(5.5)))
            .rate_change(61, Rate::from_percentage(dec!(6)))
            .term_months(240)
            .additional_costs(Money::from_major(4_000))
            .currency("EUR")
            .build()
            .unwrap();

        assert_eq!(terms.rate_schedule.changes().len(), 3);
        assert_eq!(terms.initial_rate(), Rate::from_percentage(dec!(7)));
        assert_eq!(terms.financed_amount(), Money::from_major(204_000));
        assert_eq!(terms.currency, "EUR");
    }

    #[test]
    fn test_builder_without_month_one_rate_fails() {
        let result = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate_change(6, Rate::from_percentage(dec!(4)))
            .term_months(24)
            .build();
        assert!(matches!(result, Err(ScheduleError::MalformedRateSchedule { .. })));
    }

    #[test]
    fn test_validation() {
        let rates = RateSchedule::flat(Rate::from_percentage(dec!(5))).unwrap();

        assert!(LoanTerms::new(Money::ZERO, rates.clone(), 12, Money::ZERO).is_err());
        assert!(LoanTerms::new(Money::from_major(1_000), rates.clone(), 0, Money::ZERO).is_err());
        assert!(LoanTerms::new(Money::from_major(1_000), rates.clone(), 12, Money::from_major(-1)).is_err());
        assert!(LoanTerms::new(Money::from_major(1_000), rates, 12, Money::ZERO).is_ok());
    }

    #[test]
    fn test_term_upper_bound() {
        let rates = RateSchedule::flat(Rate::from_percentage(dec!(5))).unwrap();

        assert!(LoanTerms::new(Money::from_major(1_000), rates.clone(), MAX_TERM_MONTHS, Money::ZERO).is_ok());
        for term in [MAX_TERM_MONTHS + 1, u32::MAX] {
            assert!(matches!(
                LoanTerms::new(Money::from_major(1_000), rates.clone(), term, Money::ZERO),
                Err(ScheduleError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_term_years_overflow_is_an_error() {
        let result = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(dec!(5)))
            .term_years(u32::MAX)
            .build();
        assert!(matches!(result, Err(ScheduleError::InvalidInput { .. })));

        // a later explicit term replaces the bad one
        let terms = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(dec!(5)))
            .term_years(u32::MAX)
            .term_months(24)
            .build()
            .unwrap();
        assert_eq!(terms.term_months, 24);
    }

    #[test]
    fn test_standard_payment_uses_financed_amount() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(115_000))
            .rate(Rate::from_percentage(dec!(6)))
            .term_months(360)
            .additional_costs(Money::from_major(5_000))
            .build()
            .unwrap();

        assert_eq!(terms.standard_payment().unwrap().round_cents(), Money::from(dec!(719.46)));
    }

    #[test]
    fn test_json_round_trip_keeps_currency() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(50_000))
            .rate(Rate::from_percentage(dec!(8)))
            .term_months(60)
            .currency("USD")
            .build()
            .unwrap();

        let restored = LoanTerms::from_json(&terms.json()).unwrap();
        assert_eq!(restored, terms);
    }

    #[test]
    fn test_from_json_defaults_and_validation() {
        let json = r#"{
            "principal": "25000",
            "rate_schedule": [{"effective_month": 1, "annual_rate": "0.09"}],
            "term_months": 36
        }"#;
        let terms = LoanTerms::from_json(json).unwrap();
        assert_eq!(terms.additional_costs, Money::ZERO);
        assert_eq!(terms.currency, DEFAULT_CURRENCY);

        let zero_term = json.replace("36", "0");
        assert!(LoanTerms::from_json(&zero_term).is_err());
    }
}
