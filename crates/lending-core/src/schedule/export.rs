use std::io::Write;

use crate::error::LendingError;
use crate::types::Money;

use super::builder::ScheduleRow;

/// Column headers of an exported schedule, in contract order.
pub const CSV_HEADERS: [&str; 6] = ["#", "Date", "Payment", "Principal", "Interest", "Balance"];

/// Render a monetary value fixed to two decimal places.
pub fn format_money(value: Money) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// One export record per schedule row: ISO dates, money at two decimals.
pub fn csv_records(rows: &[ScheduleRow]) -> Vec<[String; 6]> {
    rows.iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.due_date.format("%Y-%m-%d").to_string(),
                format_money(row.payment_amount),
                format_money(row.principal_component),
                format_money(row.interest_component),
                format_money(row.remaining_balance),
            ]
        })
        .collect()
}

/// Write a schedule as CSV, headers included, to any writer.
pub fn write_csv<W: Write>(rows: &[ScheduleRow], writer: W) -> Result<(), LendingError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for record in csv_records(rows) {
        csv_writer.write_record(&record)?;
    }
    csv_writer
        .flush()
        .map_err(|e| LendingError::ExportError(e.to_string()))
}

/// Render a schedule as a CSV document in memory.
pub fn csv_string(rows: &[ScheduleRow]) -> Result<String, LendingError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| LendingError::ExportError(e.to_string()))
}
