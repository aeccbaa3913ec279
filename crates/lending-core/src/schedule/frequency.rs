use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// How often a loan is repaid.
///
/// The wire format of the origination form is an open string; anything the
/// form sends that is not a known frequency collapses to [`Monthly`], which
/// is also the default for a blank form.
///
/// [`Monthly`]: PaymentFrequency::Monthly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Fortnightly,
    Weekly,
    // serde requires the catch-all variant to close the enum
    #[default]
    #[serde(other)]
    Monthly,
}

/// Longest schedule the engine will build, at any frequency. Covers
/// centuries of weekly billing; longer terms resolve to zero periods.
pub const MAX_PERIODS: u32 = 10_000;

/// Number of payment periods spanned by a term of whole months.
///
/// Sub-monthly frequencies are scaled per year of term (24 fortnights,
/// 52 weeks) and rounded up so a partial trailing period still bills.
/// A term of zero or fewer months has no periods, and neither does one
/// that would run past [`MAX_PERIODS`].
pub fn periods_in_term(term_months: i64, frequency: PaymentFrequency) -> u32 {
    if term_months <= 0 {
        return 0;
    }
    let periods = match frequency {
        PaymentFrequency::Monthly => i128::from(term_months),
        PaymentFrequency::Fortnightly => ceil_div(i128::from(term_months) * 24, 12),
        PaymentFrequency::Weekly => ceil_div(i128::from(term_months) * 52, 12),
    };
    if periods > i128::from(MAX_PERIODS) {
        return 0;
    }
    periods as u32
}

/// Per-period interest rate for a nominal annual percentage rate.
///
/// 12.5 means 12.5% per year; the result is a plain decimal fraction
/// (monthly 12.5% -> 0.0104166...).
pub fn period_rate(annual_rate_percent: Rate, frequency: PaymentFrequency) -> Rate {
    let annual = annual_rate_percent / dec!(100);
    match frequency {
        PaymentFrequency::Monthly => annual / dec!(12),
        PaymentFrequency::Fortnightly => annual / dec!(26),
        PaymentFrequency::Weekly => annual / dec!(52),
    }
}

fn ceil_div(numerator: i128, denominator: i128) -> i128 {
    (numerator + denominator - 1) / denominator
}
