use serde_json::Value;

/// Pretty-print a result envelope as JSON to stdout. Schedules come out
/// with their full row arrays; the table and csv formats re-shape them.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
