mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{SubmitArgs, ValidateArgs};
use commands::schedule::ScheduleArgs;

/// Loan origination calculations
#[derive(Parser)]
#[command(
    name = "lend",
    version,
    about = "Loan origination calculations with decimal precision",
    long_about = "A CLI for loan origination calculations with decimal precision. \
                  Computes amortization schedules (equal principal, equal total, \
                  interest-only) across monthly, fortnightly, and weekly billing, \
                  validates applications against product bounds, and assembles \
                  submittable loan documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an amortization schedule from loan terms
    Schedule(ScheduleArgs),
    /// Check a loan application against required fields and product bounds
    Validate(ValidateArgs),
    /// Freeze a validated application into a submittable loan document
    Submit(SubmitArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Submit(args) => commands::loan::run_submit(args),
        Commands::Version => {
            println!("lend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
