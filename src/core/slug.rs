//! Identifier-safe slugs derived from display names.
use chrono::NaiveDate;

const SEPARATOR: char = '_';

/// Lower-case `s`, collapse every run of non `[a-z0-9]` characters into a
/// single `_`, and trim separators from both ends.
///
/// `"Spearbit Labs Inc"` becomes `"spearbit_labs_inc"`.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_separator = false;

    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push(SEPARATOR);
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }

    out
}

/// `<slugified-client-name>_<YYYY-MM>` for the month the period starts in.
pub fn invoice_number(client_name: &str, period_start: NaiveDate) -> String {
    format!(
        "{}{}{}",
        slugify(client_name),
        SEPARATOR,
        period_start.format("%Y-%m")
    )
}
