use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::savings::{compare_savings, cumulative_savings, CumulativeSavingsPoint, SavingsReport};
use crate::schedule::{DatedInstallment, OverpaymentPolicy, Schedule, ScheduleGenerator};

/// Everything needed to present one repayment strategy: the dated schedule,
/// and for overpaying strategies the comparison against plain repayment.
/// Output view only; recalculate from the terms instead of reading it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepaymentPlan {
    pub terms: LoanTerms,
    pub strategy: OverpaymentPolicy,
    pub standard_payment: Money,
    pub installments: Vec<DatedInstallment>,
    pub savings: Option<SavingsReport>,
    pub cumulative_savings: Vec<CumulativeSavingsPoint>,
    #[serde(skip)]
    schedule: Schedule,
    #[serde(skip)]
    baseline: Schedule,
}

impl RepaymentPlan {
    /// Generate the strategy schedule and the no-overpayment baseline, then
    /// date installments starting one month after `start_date`.
    ///
    /// Overpaying strategies need a positive amount.
    pub fn calculate(terms: &LoanTerms, strategy: OverpaymentPolicy, start_date: NaiveDate) -> Result<Self> {
        if let OverpaymentPolicy::FixedAmount(amount) | OverpaymentPolicy::TotalPaymentTarget(amount) =
            strategy
        {
            if !amount.is_positive() {
                return Err(ScheduleError::InvalidStrategyAmount {
                    standard_payment: terms.standard_payment()?,
                    provided: amount,
                });
            }
        }

        let baseline = ScheduleGenerator::no_overpayment().generate(terms)?;
        let schedule = match strategy {
            OverpaymentPolicy::None => baseline.clone(),
            _ => ScheduleGenerator::new(strategy).generate(terms)?,
        };

        let (savings, series) = match strategy {
            OverpaymentPolicy::None => (None, Vec::new()),
            _ => (
                Some(compare_savings(&baseline, &schedule)),
                cumulative_savings(&baseline, &schedule),
            ),
        };

        if let Some(report) = &savings {
            debug!(
                strategy = %strategy,
                interest_savings = %report.interest_savings,
                period_reduction = report.period_reduction,
                "repayment plan calculated"
            );
        }

        Ok(Self {
            terms: terms.clone(),
            strategy,
            standard_payment: terms.standard_payment()?,
            installments: schedule.with_dates(start_date)?,
            savings,
            cumulative_savings: series,
            schedule,
            baseline,
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// plain repayment of the same loan
    pub fn baseline(&self) -> &Schedule {
        &self.baseline
    }

    /// due date of the final installment
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.installments.last().map(|i| i.date)
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn terms() -> LoanTerms {
        LoanTerms::builder()
            .principal(Money::from_major(240_000))
            .rate(Rate::from_percentage(dec!(7.2)))
            .rate_change(37, Rate::from_percentage(dec!(6.1)))
            .term_years(25)
            .additional_costs(Money::from_major(3_500))
            .build()
            .unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_no_overpayment_plan_has_no_savings() {
        let plan = RepaymentPlan::calculate(&terms(), OverpaymentPolicy::None, start()).unwrap();

        assert!(plan.savings.is_none());
        assert!(plan.cumulative_savings.is_empty());
        assert_eq!(plan.installments.len(), 300);
        assert_eq!(plan.schedule(), plan.baseline());
        assert_eq!(plan.payoff_date(), NaiveDate::from_ymd_opt(2050, 1, 15));
    }

    #[test]
    fn test_fixed_overpayment_plan() {
        let plan = RepaymentPlan::calculate(
            &terms(),
            OverpaymentPolicy::FixedAmount(Money::from_major(500)),
            start(),
        )
        .unwrap();

        let savings = plan.savings.as_ref().unwrap();
        assert_eq!(savings.original_period, 300);
        assert_eq!(savings.overpayment_period as usize, plan.installments.len());
        assert!(savings.period_reduction > 0);
        assert!(savings.interest_savings > Money::ZERO);
        assert_eq!(plan.cumulative_savings.len(), plan.installments.len());
        assert!(plan.payoff_date().unwrap() < NaiveDate::from_ymd_opt(2050, 1, 15).unwrap());
    }

    #[test]
    fn test_mix_plan_rejects_low_target() {
        let terms = terms();
        let standard = terms.standard_payment().unwrap();
        let result = RepaymentPlan::calculate(
            &terms,
            OverpaymentPolicy::TotalPaymentTarget(standard - Money::ONE),
            start(),
        );
        assert!(matches!(result, Err(ScheduleError::InvalidStrategyAmount { .. })));
    }

    #[test]
    fn test_non_positive_strategy_amount_rejected() {
        for strategy in [
            OverpaymentPolicy::FixedAmount(Money::ZERO),
            OverpaymentPolicy::TotalPaymentTarget(Money::ZERO),
        ] {
            let result = RepaymentPlan::calculate(&terms(), strategy, start());
            assert!(matches!(result, Err(ScheduleError::InvalidStrategyAmount { .. })));
        }
    }

    #[test]
    fn test_json_view() {
        let plan = RepaymentPlan::calculate(
            &terms(),
            OverpaymentPolicy::TotalPaymentTarget(Money::from_major(2_500)),
            start(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&plan.json()).unwrap();
        assert_eq!(value["strategy"]["kind"], "total_payment_target");
        assert_eq!(value["installments"][0]["date"], "2025-02-15");
        assert_eq!(value["installments"][0]["installment_number"], 1);
        assert!(value["savings"]["interest_savings"].is_string());
    }

    #[test]
    fn test_json_view_matches_schedule() {
        let plan = RepaymentPlan::calculate(
            &terms(),
            OverpaymentPolicy::FixedAmount(Money::from_major(800)),
            start(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&plan.json()).unwrap();
        let rows = value["installments"].as_array().unwrap();
        assert_eq!(rows.len(), plan.schedule().len());
        assert_eq!(rows.len(), plan.installments.len());
        assert!(value.get("schedule").is_none());
        assert!(value.get("baseline").is_none());

        let last = plan.schedule().last().unwrap();
        assert_eq!(
            rows.last().unwrap()["remaining_capital"],
            serde_json::to_value(last.remaining_capital).unwrap()
        );
    }
}
