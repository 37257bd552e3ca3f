//! Display formatting for table cells and stat cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats an amount as US dollars: `1234.5` becomes `"$1,234.50"`.
///
/// Negative amounts get a leading minus (`"-$3.00"`). Non-finite input
/// renders as `"$0.00"`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round();
    // Formatting through the integer part avoids float noise in the digits.
    let whole = format!("{:.0}", (cents / 100.0).trunc());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let frac = (cents % 100.0) as u32;
    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(&whole))
}

/// Inserts `,` every three digits from the right of an ASCII digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an ISO `YYYY-MM-DD` date as `"Jan 15, 2024"`.
///
/// A time suffix is accepted as RFC 3339 (`2023-12-01T10:30:00Z`) or as a
/// zone-less `T` time; the date part is rendered as written. Anything that
/// is not a real calendar date in that shape is returned as-is.
#[must_use]
pub fn format_date(iso: &str) -> String {
    parse_date(iso).map_or_else(|| iso.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

fn parse_date(iso: &str) -> Option<NaiveDate> {
    let iso = iso.trim();
    let (date_part, time_part) = match iso.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (iso, None),
    };
    if !is_padded_ymd(date_part) {
        return None;
    }
    match time_part {
        None => NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok(),
        Some(_) => DateTime::parse_from_rfc3339(iso)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .ok(),
    }
}

/// `YYYY-MM-DD` with exactly four, two, and two ASCII digits.
fn is_padded_ymd(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Formats a percentage with one decimal: `12.345` becomes `"12.3%"`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        "0.0%".to_string()
    }
}

/// Avatar initials: first letter of up to two words, uppercased.
///
/// `"Sarah Johnson"` becomes `"SJ"`; a blank name becomes `"?"`.
#[must_use]
pub fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if out.is_empty() {
        "?".to_string()
    } else {
        out
    }
}
