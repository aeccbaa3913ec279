use std::fs::File;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use lending_core::schedule::builder::{build_loan_schedule, LoanScheduleInput};
use lending_core::schedule::export;
use lending_core::schedule::frequency::PaymentFrequency;
use lending_core::schedule::RepaymentMethod;

use crate::input;

/// Arguments for schedule computation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Nominal annual interest rate in percent (12.5 = 12.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in whole months
    #[arg(long)]
    pub term_months: Option<i64>,

    /// Payment frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: FrequencyArg,

    /// Repayment method
    #[arg(long, value_enum, default_value = "equal-principal")]
    pub method: MethodArg,

    /// First drawdown date (YYYY-MM-DD); due dates step forward from here
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Also write the schedule to a CSV file at this path
    #[arg(long)]
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    Fortnightly,
    Weekly,
}

impl From<FrequencyArg> for PaymentFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => PaymentFrequency::Monthly,
            FrequencyArg::Fortnightly => PaymentFrequency::Fortnightly,
            FrequencyArg::Weekly => PaymentFrequency::Weekly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    EqualPrincipal,
    EqualTotal,
    InterestOnly,
}

impl From<MethodArg> for RepaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::EqualPrincipal => RepaymentMethod::EqualPrincipal,
            MethodArg::EqualTotal => RepaymentMethod::EqualTotal,
            MethodArg::InterestOnly => RepaymentMethod::InterestOnly,
        }
    }
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: LoanScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        // Flags map straight onto the draft form state: missing values are
        // allowed and yield an empty schedule with warnings
        LoanScheduleInput {
            principal: args.amount,
            annual_rate_percent: args.rate,
            term_months: args.term_months,
            frequency: args.frequency.into(),
            method: args.method.into(),
            start_date: args.start_date,
        }
    };

    // Rate sanity lives with the caller; the engine computes whatever it is
    // handed as long as the numerics are positive
    if let Some(rate) = schedule_input.annual_rate_percent {
        if rate < Decimal::ZERO {
            return Err("annual rate must not be negative".into());
        }
        if rate > dec!(100) {
            eprintln!("warning: annual rate {rate}% is above 100%");
        }
    }

    let result = build_loan_schedule(&schedule_input)?;

    if let Some(ref path) = args.csv {
        let file = File::create(path)
            .map_err(|e| format!("Failed to create '{path}': {e}"))?;
        export::write_csv(&result.result.rows, file)?;
    }

    Ok(serde_json::to_value(result)?)
}
