/// quick start - minimal example to get started
use loan_schedule_rs::{generate_schedule_no_overpayment, Money, Rate, RateChange};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 120,000 at 6% over 30 years
    let rates = [RateChange::new(1, Rate::from_percentage(dec!(6)))];
    let schedule = generate_schedule_no_overpayment(Money::from_major(120_000), &rates, 360, Money::ZERO)?;

    for installment in schedule.iter().take(3) {
        println!(
            "#{:>3}  payment {:>8}  capital {:>8}  interest {:>8}  left {:>10}",
            installment.installment_number,
            installment.installment_amount,
            installment.capital_payment,
            installment.interest_payment,
            installment.remaining_capital,
        );
    }
    println!("total interest: {}", schedule.total_interest());

    Ok(())
}
