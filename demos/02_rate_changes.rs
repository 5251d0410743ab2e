/// rate changes - variable rate loan with a mix strategy, printed as JSON
use chrono::NaiveDate;
use loan_schedule_rs::{LoanTerms, Money, OverpaymentPolicy, Rate, RepaymentPlan};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::builder()
        .principal(Money::from_major(30_000))
        .rate(Rate::from_percentage(dec!(9.5)))
        .rate_change(7, Rate::from_percentage(dec!(8.25)))
        .rate_change(13, Rate::from_percentage(dec!(7)))
        .term_months(24)
        .currency("EUR")
        .build()?;

    let start = NaiveDate::from_ymd_opt(2025, 1, 31).ok_or("bad start date")?;
    let plan = RepaymentPlan::calculate(
        &terms,
        OverpaymentPolicy::TotalPaymentTarget(Money::from_major(1_600)),
        start,
    )?;

    println!("{}", plan.json());

    Ok(())
}
