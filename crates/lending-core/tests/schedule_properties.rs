// ============================================================
// Property-based invariants of the schedule builder
// ============================================================

use chrono::NaiveDate;
use lending_core::schedule::builder::{amortization_rows, LoanScheduleInput, RepaymentMethod};
use lending_core::schedule::frequency::{self, PaymentFrequency};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn frequencies() -> impl Strategy<Value = PaymentFrequency> {
    prop_oneof![
        Just(PaymentFrequency::Monthly),
        Just(PaymentFrequency::Fortnightly),
        Just(PaymentFrequency::Weekly),
    ]
}

fn methods() -> impl Strategy<Value = RepaymentMethod> {
    prop_oneof![
        Just(RepaymentMethod::EqualPrincipal),
        Just(RepaymentMethod::EqualTotal),
        Just(RepaymentMethod::InterestOnly),
    ]
}

#[allow(clippy::too_many_arguments)]
fn arbitrary_terms(
    principal_cents: i64,
    rate_basis_points: i64,
    term_months: i64,
    frequency: PaymentFrequency,
    method: RepaymentMethod,
    year: i32,
    month: u32,
    day: u32,
) -> LoanScheduleInput {
    LoanScheduleInput {
        principal: Some(Decimal::new(principal_cents, 2)),
        annual_rate_percent: Some(Decimal::new(rate_basis_points, 2)),
        term_months: Some(term_months),
        frequency,
        method,
        start_date: NaiveDate::from_ymd_opt(year, month, day),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_payment_splits_exactly(
        principal_cents in 1i64..=1_000_000_000,
        rate_basis_points in 0i64..=10_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, rate_basis_points, term_months,
            frequency, method, year, month, day,
        );
        for row in amortization_rows(&input) {
            prop_assert_eq!(
                row.payment_amount,
                row.principal_component + row.interest_component
            );
        }
    }

    #[test]
    fn prop_balance_is_non_increasing_and_closes_at_zero(
        principal_cents in 1i64..=1_000_000_000,
        rate_basis_points in 0i64..=10_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, rate_basis_points, term_months,
            frequency, method, year, month, day,
        );
        let rows = amortization_rows(&input);
        prop_assert!(!rows.is_empty());

        let mut balance = Decimal::new(principal_cents, 2);
        for row in &rows {
            prop_assert!(row.remaining_balance <= balance);
            prop_assert!(row.remaining_balance >= Decimal::ZERO);
            balance = row.remaining_balance;
        }

        let terminal = rows.last().unwrap().remaining_balance;
        prop_assert!(terminal.abs() <= Decimal::new(1, 2));
        prop_assert_eq!(terminal, Decimal::ZERO);
    }

    #[test]
    fn prop_row_count_matches_period_resolver(
        principal_cents in 1i64..=1_000_000_000,
        rate_basis_points in 0i64..=10_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, rate_basis_points, term_months,
            frequency, method, year, month, day,
        );
        let rows = amortization_rows(&input);
        let expected = frequency::periods_in_term(term_months, frequency);
        prop_assert_eq!(rows.len() as u32, expected);
        for (position, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.index, position as u32 + 1);
        }
    }

    #[test]
    fn prop_principal_components_sum_to_principal(
        principal_cents in 1i64..=1_000_000_000,
        rate_basis_points in 0i64..=10_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, rate_basis_points, term_months,
            frequency, method, year, month, day,
        );
        let rows = amortization_rows(&input);
        let repaid: Decimal = rows.iter().map(|r| r.principal_component).sum();
        let principal = Decimal::new(principal_cents, 2);
        prop_assert!((repaid - principal).abs() <= Decimal::new(1, 2));
    }

    #[test]
    fn prop_due_dates_strictly_increase(
        principal_cents in 1i64..=1_000_000_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, 500, term_months,
            frequency, method, year, month, day,
        );
        let rows = amortization_rows(&input);
        let start = input.start_date.unwrap();
        prop_assert!(rows[0].due_date > start);
        for pair in rows.windows(2) {
            prop_assert!(pair[1].due_date > pair[0].due_date);
        }
    }

    #[test]
    fn prop_zero_rate_means_zero_interest(
        principal_cents in 1i64..=1_000_000_000,
        term_months in 1i64..=360,
        frequency in frequencies(),
        method in methods(),
        year in 2020i32..2031,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let input = arbitrary_terms(
            principal_cents, 0, term_months,
            frequency, method, year, month, day,
        );
        for row in amortization_rows(&input) {
            prop_assert_eq!(row.interest_component, Decimal::ZERO);
            prop_assert_eq!(row.payment_amount, row.principal_component);
        }
    }
}
