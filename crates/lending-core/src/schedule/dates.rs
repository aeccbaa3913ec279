use chrono::{Datelike, Duration, NaiveDate};

use super::frequency::PaymentFrequency;

/// Add calendar months to a date, clamping the day to the end of the
/// target month (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).
/// Offsets that leave the calendar's range fall back to the input date.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let base = i64::from(date.year()) * 12 + i64::from(date.month()) - 1;
    let total_months = base.saturating_add(months);
    let year = match i32::try_from(total_months.div_euclid(12)) {
        Ok(year) => year,
        Err(_) => return date,
    };
    let month = (total_months.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Due date of a payment period, counted from zero.
///
/// Monthly periods walk the calendar so month-end start dates stay pinned
/// to month ends; fortnightly and weekly periods are fixed 14- and 7-day
/// strides from the start date.
pub fn due_date(start_date: NaiveDate, frequency: PaymentFrequency, period: u32) -> NaiveDate {
    let step = i64::from(period) + 1;
    match frequency {
        PaymentFrequency::Monthly => add_months(start_date, step),
        PaymentFrequency::Fortnightly => add_days(start_date, step * 14),
        PaymentFrequency::Weekly => add_days(start_date, step * 7),
    }
}

/// Contractual end of the loan: the start date advanced by the whole term.
pub fn maturity_date(start_date: NaiveDate, term_months: i64) -> NaiveDate {
    add_months(start_date, term_months)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
