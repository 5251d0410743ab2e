use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::Schedule;

/// interest and term saved by an overpayment strategy against a baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsReport {
    pub original_interest: Money,
    pub overpayment_interest: Money,
    /// negative when the variant costs more
    pub interest_savings: Money,
    pub original_period: u32,
    pub overpayment_period: u32,
    /// negative when the variant runs longer
    pub period_reduction: i64,
}

impl SavingsReport {
    pub fn has_savings(&self) -> bool {
        self.interest_savings.is_positive() || self.period_reduction > 0
    }
}

/// Compare total interest and length of two schedules.
///
/// No check that both describe the same loan; the caller compares like with
/// like.
pub fn compare_savings(baseline: &Schedule, variant: &Schedule) -> SavingsReport {
    let original_interest = baseline.total_interest().round_cents();
    let overpayment_interest = variant.total_interest().round_cents();
    let original_period = baseline.len() as u32;
    let overpayment_period = variant.len() as u32;

    SavingsReport {
        original_interest,
        overpayment_interest,
        interest_savings: (original_interest - overpayment_interest).round_cents(),
        original_period,
        overpayment_period,
        period_reduction: original_period as i64 - overpayment_period as i64,
    }
}

/// running interest totals up to one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeSavingsPoint {
    pub installment_number: u32,
    pub baseline_interest: Money,
    pub variant_interest: Money,
    pub savings: Money,
}

/// Running interest of both schedules, installment by installment, up to the
/// end of the shorter one.
pub fn cumulative_savings(baseline: &Schedule, variant: &Schedule) -> Vec<CumulativeSavingsPoint> {
    baseline
        .iter()
        .zip(variant.iter())
        .scan((Money::ZERO, Money::ZERO), |(base_total, variant_total), (base, var)| {
            *base_total += base.interest_payment;
            *variant_total += var.interest_payment;
            Some(CumulativeSavingsPoint {
                installment_number: var.installment_number,
                baseline_interest: *base_total,
                variant_interest: *variant_total,
                savings: *base_total - *variant_total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::rates::RateChange;
    use crate::schedule::{
        generate_schedule_fixed_overpayment, generate_schedule_mix_strategy,
        generate_schedule_no_overpayment, Installment,
    };
    use rust_decimal_macros::dec;

    fn installment(number: u32, interest: Money) -> Installment {
        Installment {
            installment_number: number,
            interest_rate: dec!(5),
            current_debt: Money::ZERO,
            installment_amount: Money::ZERO,
            capital_payment: Money::ZERO,
            interest_payment: interest,
            overpayment: Money::ZERO,
            remaining_capital: Money::ZERO,
        }
    }

    #[test]
    fn test_fixed_overpayment_saves_interest_and_time() {
        let rates = vec![RateChange::new(1, Rate::from_percentage(dec!(8)))];
        let baseline =
            generate_schedule_no_overpayment(Money::from_major(10_000), &rates, 24, Money::ZERO).unwrap();
        let variant = generate_schedule_fixed_overpayment(
            Money::from_major(10_000),
            &rates,
            24,
            Money::from_major(200),
            Money::ZERO,
        )
        .unwrap();

        let report = compare_savings(&baseline, &variant);

        assert_eq!(report.original_period, 24);
        assert!(report.period_reduction > 0);
        assert!(report.interest_savings > Money::ZERO);
        assert_eq!(
            report.interest_savings,
            report.original_interest - report.overpayment_interest
        );
        assert!(report.has_savings());
    }

    #[test]
    fn test_identical_schedules_save_nothing() {
        let rates = vec![RateChange::new(1, Rate::from_percentage(dec!(5)))];
        let schedule =
            generate_schedule_no_overpayment(Money::from_major(50_000), &rates, 60, Money::ZERO).unwrap();

        let report = compare_savings(&schedule, &schedule);
        assert_eq!(report.interest_savings, Money::ZERO);
        assert_eq!(report.period_reduction, 0);
        assert!(!report.has_savings());
    }

    #[test]
    fn test_negative_savings_are_reported() {
        let cheap = Schedule::new(vec![installment(1, Money::from_major(10))]);
        let expensive = Schedule::new(vec![
            installment(1, Money::from_major(10)),
            installment(2, Money::from_major(15)),
        ]);

        let report = compare_savings(&cheap, &expensive);
        assert_eq!(report.interest_savings, Money::from_major(-15));
        assert_eq!(report.period_reduction, -1);
    }

    #[test]
    fn test_cumulative_savings_series() {
        let baseline = Schedule::new(vec![
            installment(1, Money::from_major(100)),
            installment(2, Money::from_major(90)),
            installment(3, Money::from_major(80)),
        ]);
        let variant = Schedule::new(vec![
            installment(1, Money::from_major(100)),
            installment(2, Money::from_major(70)),
        ]);

        let series = cumulative_savings(&baseline, &variant);

        assert_eq!(series.len(), 2);
        assert_eq!(series[1].installment_number, 2);
        assert_eq!(series[1].baseline_interest, Money::from_major(190));
        assert_eq!(series[1].variant_interest, Money::from_major(170));
        assert_eq!(series[1].savings, Money::from_major(20));
    }

    #[test]
    fn test_mix_strategy_savings_grow_over_time() {
        let rates = vec![RateChange::new(1, Rate::from_percentage(dec!(6)))];
        let baseline =
            generate_schedule_no_overpayment(Money::from_major(120_000), &rates, 360, Money::ZERO).unwrap();
        let mix = generate_schedule_mix_strategy(
            Money::from_major(120_000),
            &rates,
            360,
            Money::from_major(900),
            Money::ZERO,
        )
        .unwrap();

        let series = cumulative_savings(&baseline, &mix);
        assert_eq!(series.len(), mix.len());
        for pair in series.windows(2) {
            assert!(pair[1].savings >= pair[0].savings);
        }

        let report = compare_savings(&baseline, &mix);
        assert_eq!(report.overpayment_period as usize, mix.len());
        assert!(report.interest_savings > Money::ZERO);
    }
}
