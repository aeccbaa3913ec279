pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pull the schedule rows back out of a result envelope, if this value
/// carries any. Formatters use this to render schedules with the same
/// column contract as the CSV exporter.
pub(crate) fn schedule_rows(value: &Value) -> Option<Vec<lending_core::schedule::ScheduleRow>> {
    let rows = value.as_object()?.get("result")?.get("rows")?;
    serde_json::from_value(rows.clone()).ok()
}
