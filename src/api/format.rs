use std::fmt::Write as _;

use chrono::NaiveDate;

/// Formats `date` with a strftime pattern, falling back to ISO-8601 when the
/// pattern cannot be rendered.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Fixed-precision temperature text, e.g. `"72.5°F"`.
#[must_use]
pub fn format_temperature(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_owned();
    }
    format!("{value:.decimals$}°F")
}

/// Axis tick label: integers print without a fractional part.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}
