use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::LendingError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};

use super::dates;
use super::frequency::{self, PaymentFrequency};

// ---------- Magnitude envelope ----------

/// Largest principal the engine computes with. Together with
/// [`MAX_ANNUAL_RATE_PERCENT`] and [`frequency::MAX_PERIODS`] this keeps
/// every intermediate product representable in [`Decimal`].
pub const MAX_PRINCIPAL: Decimal = dec!(1_000_000_000_000_000);

/// Largest annual rate magnitude, in percent, the engine computes with.
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(1_000_000);

// ---------- Input types ----------

/// How principal and interest are split across the schedule.
///
/// Unknown wire values collapse to [`EqualPrincipal`], which is also the
/// default for a blank form.
///
/// [`EqualPrincipal`]: RepaymentMethod::EqualPrincipal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// Same total payment every period (annuity).
    EqualTotal,
    /// Interest-only periods with the full principal due in the final one.
    InterestOnly,
    // serde requires the catch-all variant to close the enum
    /// Same principal every period; the total payment shrinks with interest.
    #[default]
    #[serde(other)]
    EqualPrincipal,
}

impl RepaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPrincipal => "equal principal",
            RepaymentMethod::EqualTotal => "equal total",
            RepaymentMethod::InterestOnly => "interest only",
        }
    }
}

/// Loan terms as captured by the origination form.
///
/// Numeric fields stay optional so a half-filled form can still ask for a
/// schedule; anything missing or non-positive yields an empty one instead
/// of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanScheduleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    /// Nominal annual rate in percent (12.5 = 12.5%). Missing means no
    /// product has been selected yet; interest is computed at 0%.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<i64>,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub method: RepaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

// ---------- Output types ----------

/// One payment period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period number.
    pub index: u32,
    pub due_date: NaiveDate,
    /// Always equals `principal_component + interest_component`.
    pub payment_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    /// Outstanding principal after this period's payment.
    pub remaining_balance: Money,
}

/// A computed schedule together with its headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub rows: Vec<ScheduleRow>,
    pub period_count: u32,
    /// Interest rate applied per period, as a decimal fraction.
    pub periodic_rate: Rate,
    pub total_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_due_date: Option<NaiveDate>,
}

// ---------- Schedule construction ----------

/// Build the amortization rows for the given loan terms.
///
/// Depends only on its input, so it is safe to call on every keystroke of
/// a form. Incomplete terms (missing or non-positive principal or term,
/// missing start date) produce an empty vector rather than an error; a
/// missing rate is treated as 0%. Magnitudes past the engine envelope
/// ([`MAX_PRINCIPAL`], [`MAX_ANNUAL_RATE_PERCENT`],
/// [`frequency::MAX_PERIODS`]) get the same empty-schedule treatment.
pub fn amortization_rows(input: &LoanScheduleInput) -> Vec<ScheduleRow> {
    let principal = match input.principal {
        Some(p) if p > Decimal::ZERO && p <= MAX_PRINCIPAL => p,
        _ => return Vec::new(),
    };
    let periods = frequency::periods_in_term(input.term_months.unwrap_or(0), input.frequency);
    if periods == 0 {
        return Vec::new();
    }
    let start_date = match input.start_date {
        Some(d) => d,
        None => return Vec::new(),
    };
    let annual_rate = input.annual_rate_percent.unwrap_or(Decimal::ZERO);
    if annual_rate.abs() > MAX_ANNUAL_RATE_PERCENT {
        return Vec::new();
    }
    let rate = frequency::period_rate(annual_rate, input.frequency);

    match input.method {
        RepaymentMethod::EqualTotal => {
            equal_total_rows(principal, rate, periods, start_date, input.frequency)
        }
        RepaymentMethod::InterestOnly => {
            interest_only_rows(principal, rate, periods, start_date, input.frequency)
        }
        RepaymentMethod::EqualPrincipal => {
            equal_principal_rows(principal, rate, periods, start_date, input.frequency)
        }
    }
}

/// Constant principal per period; interest accrues on the declining balance.
fn equal_principal_rows(
    principal: Money,
    rate: Rate,
    periods: u32,
    start_date: NaiveDate,
    frequency: PaymentFrequency,
) -> Vec<ScheduleRow> {
    let principal_per_period = principal / Decimal::from(periods);
    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 0..periods {
        let interest = balance * rate;
        let principal_paid = if period == periods - 1 {
            // Final period repays whatever is left so the loan closes at zero
            balance
        } else {
            principal_per_period.min(balance)
        };
        balance = (balance - principal_paid).max(Decimal::ZERO);

        rows.push(ScheduleRow {
            index: period + 1,
            due_date: dates::due_date(start_date, frequency, period),
            payment_amount: interest + principal_paid,
            principal_component: principal_paid,
            interest_component: interest,
            remaining_balance: balance,
        });
    }

    rows
}

/// Level payment per period (annuity); the principal share grows as the
/// interest share shrinks.
fn equal_total_rows(
    principal: Money,
    rate: Rate,
    periods: u32,
    start_date: NaiveDate,
    frequency: PaymentFrequency,
) -> Vec<ScheduleRow> {
    let payment = annuity_payment(principal, rate, periods);
    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 0..periods {
        let interest = balance * rate;
        let principal_paid = if period == periods - 1 {
            balance
        } else {
            (payment - interest).min(balance)
        };
        balance = (balance - principal_paid).max(Decimal::ZERO);

        rows.push(ScheduleRow {
            index: period + 1,
            due_date: dates::due_date(start_date, frequency, period),
            payment_amount: interest + principal_paid,
            principal_component: principal_paid,
            interest_component: interest,
            remaining_balance: balance,
        });
    }

    rows
}

/// Interest-only periods with the whole principal bulleted into the final
/// payment. The balance never declines before then.
fn interest_only_rows(
    principal: Money,
    rate: Rate,
    periods: u32,
    start_date: NaiveDate,
    frequency: PaymentFrequency,
) -> Vec<ScheduleRow> {
    let interest = principal * rate;
    let mut rows = Vec::with_capacity(periods as usize);

    for period in 0..periods {
        let is_final = period == periods - 1;
        let principal_paid = if is_final { principal } else { Decimal::ZERO };

        rows.push(ScheduleRow {
            index: period + 1,
            due_date: dates::due_date(start_date, frequency, period),
            payment_amount: interest + principal_paid,
            principal_component: principal_paid,
            interest_component: interest,
            remaining_balance: if is_final { Decimal::ZERO } else { principal },
        });
    }

    rows
}

// ---------- Decimal helpers ----------

/// Level annuity payment: `principal * r / (1 - (1 + r)^-n)`.
///
/// A zero rate degenerates to a straight division of the principal.
fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> Money {
    if rate.is_zero() {
        return principal / Decimal::from(periods);
    }
    let denominator = Decimal::ONE - pow_recip(Decimal::ONE + rate, periods);
    if denominator > Decimal::ZERO {
        principal * rate / denominator
    } else {
        principal
    }
}

/// `base^-n` by iterative multiplication. Stays in Decimal throughout to
/// avoid f64 round-trips. A power that overflows Decimal is treated as
/// infinite, so its reciprocal collapses to zero.
fn pow_recip(base: Decimal, n: u32) -> Decimal {
    let mut power = Decimal::ONE;
    for _ in 0..n {
        power = match power.checked_mul(base) {
            Some(next) => next,
            None => return Decimal::ZERO,
        };
    }
    if power.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::ONE / power
    }
}

// ---------- Enveloped operation ----------

/// Compute the full amortization schedule for the given loan terms.
///
/// Never fails on incomplete terms: the result carries an empty schedule
/// and a warning per missing field instead.
pub fn build_loan_schedule(
    input: &LoanScheduleInput,
) -> Result<ComputationOutput<ScheduleOutput>, LendingError> {
    let start_time = std::time::Instant::now();

    let mut warnings = incomplete_reasons(input);
    if input.annual_rate_percent.is_none() {
        warnings.push("annual_rate_percent is missing; interest computed at 0%".to_string());
    }

    let rows = amortization_rows(input);
    let output = summarize(input, rows);

    let elapsed = start_time.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Amortization schedule ({})", input.method.label()),
        &json!({
            "period_count": "term months scaled by payment frequency, partial periods rounded up",
            "period_rate": "nominal annual percent divided by periods per year",
            "final_period": "repays the remaining balance exactly",
            "rounding": "full precision retained; display rounding happens at export",
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn summarize(input: &LoanScheduleInput, rows: Vec<ScheduleRow>) -> ScheduleOutput {
    let periodic_rate = frequency::period_rate(
        input.annual_rate_percent.unwrap_or(Decimal::ZERO),
        input.frequency,
    );
    let total_payment: Money = rows.iter().map(|r| r.payment_amount).sum();
    let total_principal: Money = rows.iter().map(|r| r.principal_component).sum();
    let total_interest: Money = rows.iter().map(|r| r.interest_component).sum();

    ScheduleOutput {
        period_count: rows.len() as u32,
        periodic_rate,
        total_payment,
        total_principal,
        total_interest,
        first_due_date: rows.first().map(|r| r.due_date),
        final_due_date: rows.last().map(|r| r.due_date),
        rows,
    }
}

/// Which fields keep the schedule empty. Mirrors the guard in
/// [`amortization_rows`] so warnings and behavior cannot drift apart.
fn incomplete_reasons(input: &LoanScheduleInput) -> Vec<String> {
    let mut reasons = Vec::new();
    match input.principal {
        Some(p) if p > MAX_PRINCIPAL => {
            reasons.push("principal is too large; schedule left empty".to_string())
        }
        Some(p) if p > Decimal::ZERO => {}
        Some(_) => reasons.push("principal must be positive; schedule left empty".to_string()),
        None => reasons.push("principal is missing; schedule left empty".to_string()),
    }
    match input.term_months {
        Some(t) if t > 0 => {
            if frequency::periods_in_term(t, input.frequency) == 0 {
                reasons.push("term_months is too long; schedule left empty".to_string());
            }
        }
        Some(_) => reasons.push("term_months must be positive; schedule left empty".to_string()),
        None => reasons.push("term_months is missing; schedule left empty".to_string()),
    }
    if input.start_date.is_none() {
        reasons.push("start_date is missing; schedule left empty".to_string());
    }
    if let Some(rate) = input.annual_rate_percent {
        if rate.abs() > MAX_ANNUAL_RATE_PERCENT {
            reasons.push("annual_rate_percent is too large; schedule left empty".to_string());
        }
    }
    reasons
}
