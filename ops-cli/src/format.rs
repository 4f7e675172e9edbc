//! Presentation formatting for amounts, dates, and month keys.
//!
//! The reporting engine returns plain numbers; everything locale-flavored
//! lives here.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Render an amount as currency with thousands separators, e.g. `KES 1,234.50`.
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w.to_string(), format!("{:0<2}", f)),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}KES {}.{}", sign, grouped, frac)
}

/// Render a timestamp as a short date, e.g. `Apr 3, 2025`.
pub fn date(at: DateTime<Utc>) -> String {
    calendar_date(at.date_naive())
}

/// Render a calendar date as a short date, e.g. `Jun 15, 2024`.
pub fn calendar_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {}, {}", month, date.day(), date.year())
}

/// Render a `"YYYY-M"` bucket key as a month label, e.g. `Apr 2025`.
///
/// Keys the engine did not produce render as-is.
pub fn month_label(key: &str) -> String {
    let parsed = key
        .split_once('-')
        .and_then(|(year, month)| Some((year, month.parse::<usize>().ok()?)));
    match parsed {
        Some((year, month @ 1..=12)) => format!("{} {}", MONTH_NAMES[month - 1], year),
        _ => key.to_string(),
    }
}
