//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a labeled field if it has a value.
pub fn optional_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

/// Print a dimmed note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the "page x of y" footer for a listing.
pub fn page_footer(page: u32, pages: u32, total: u64) {
    eprintln!();
    eprintln!(
        "{}",
        format!("Page {} of {} ({} total)", page, pages.max(1), total).dimmed()
    );
}

/// The wire name of a serializable enum value, e.g. `in_progress`.
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => "?".to_string(),
    }
}
