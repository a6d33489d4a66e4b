//! Human-facing formatting for dates, quantities, and money.
//!
//! Money follows en-US conventions: `,` groups thousands, `.` separates the
//! fraction, and at most the currency's minor-unit digits are kept with
//! trailing zeros dropped, so `275.00 USD` prints as `$275`.
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// `1 Mar 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn format_quantity(qty: Decimal) -> String {
    group_thousands(&qty.normalize().to_string())
}

/// Symbols the builtin PDF fonts can draw. Codes whose usual symbol is outside
/// WinAnsi (INR, KRW, ILS, VND, ...) print as the spaced ISO code instead.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "CN¥"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("HKD", "HK$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("TWD", "NT$"),
];

/// Symbol printed before the amount, and whether a space separates them.
fn currency_symbol(code: &str) -> (&str, bool) {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or((code, true), |&(_, symbol)| (symbol, false))
}

/// Number of minor-unit digits for an ISO 4217 code.
pub fn minor_units(code: &str) -> u32 {
    match code {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
        | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

pub fn format_money(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let rounded = amount
        .round_dp_with_strategy(minor_units(&code), RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = group_thousands(&rounded.abs().to_string());

    let (symbol, spaced) = currency_symbol(&code);
    if spaced {
        format!("{sign}{symbol}\u{a0}{digits}")
    } else {
        format!("{sign}{symbol}{digits}")
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
