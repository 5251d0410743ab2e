/// strategy comparison - same loan under all three repayment strategies
use chrono::NaiveDate;
use loan_schedule_rs::{LoanTerms, Money, OverpaymentPolicy, Rate, RepaymentPlan};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== strategy comparison ===\n");

    let terms = LoanTerms::builder()
        .principal(Money::from_major(400_000))
        .rate(Rate::from_percentage(dec!(7.4)))
        .term_years(30)
        .additional_costs(Money::from_major(6_000))
        .build()?;
    let start = NaiveDate::from_ymd_opt(2025, 3, 10).ok_or("bad start date")?;

    let standard = terms.standard_payment()?.round_cents();
    println!("standard installment: {} {}\n", standard, terms.currency);

    let strategies = [
        OverpaymentPolicy::None,
        OverpaymentPolicy::FixedAmount(Money::from_major(500)),
        OverpaymentPolicy::TotalPaymentTarget(Money::from_major(3_500)),
    ];

    for strategy in strategies {
        let plan = RepaymentPlan::calculate(&terms, strategy, start)?;
        println!("{}", strategy);
        println!("  installments: {}", plan.installments.len());
        if let Some(date) = plan.payoff_date() {
            println!("  paid off:     {}", date);
        }
        println!("  interest:     {}", plan.schedule().total_interest());
        if let Some(savings) = &plan.savings {
            println!("  saved:        {} over {} months", savings.interest_savings, savings.period_reduction);
        }
        println!();
    }

    Ok(())
}
