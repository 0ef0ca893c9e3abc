// SPDX-License-Identifier: GPL-3.0-only

//! Common formatting and parsing helpers shared across models

use num_format::{Locale, ToFormattedString};

/// Unit prefixes for [`humanize_bytes`], one per power of 1024.
const PREFIXES: [&str; 7] = ["B", "K", "M", "G", "T", "P", "E"];

const DIVISOR: u64 = 1024;

/// Remainder at which a scaled value is treated as the next whole unit (0.95 of the divisor).
const DECIMAL_CUT: u64 = 973;

/// Largest scaled value that still fits a four character field (three digits and a prefix).
const MAX_SCALED: u64 = 1000;

/// Convert bytes to a compact, magnitude-scaled string (e.g. "1.5G").
///
/// The result never exceeds four characters: up to three digits followed by
/// a unit prefix, or a single digit with one decimal when the scaled value is
/// below ten.
pub fn humanize_bytes(bytes: u64) -> String {
    let mut quotient = bytes;
    let mut remainder = 0;
    let mut scale = 0;

    while (quotient >= MAX_SCALED || (quotient == MAX_SCALED - 1 && remainder >= DIVISOR / 2))
        && scale < PREFIXES.len() - 1
    {
        remainder = quotient % DIVISOR;
        quotient /= DIVISOR;
        scale += 1;
    }

    if scale > 0 && (quotient < 9 || (quotient == 9 && remainder < DECIMAL_CUT)) {
        let tenths = (remainder * 10 + DIVISOR / 2) / DIVISOR;
        format!(
            "{}.{}{}",
            quotient + tenths / 10,
            tenths % 10,
            PREFIXES[scale]
        )
    } else {
        let rounded = quotient + (remainder + DIVISOR / 2) / DIVISOR;
        format!("{}{}", rounded, PREFIXES[scale])
    }
}

/// Format an integer with thousands separators (e.g. "999,960").
pub fn group_digits(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Parse an integer the way GEOM formats them: decimal, `0x` hexadecimal or
/// `0` octal, with optional sign and surrounding whitespace.
///
/// Trailing garbage after the longest valid digit run is ignored. Returns
/// `None` when no digits could be read at all. Values out of range saturate.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, text) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_hexdigit()) => (16, rest),
        _ if text.starts_with('0') => (8, text),
        _ => (10, text),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits[..end], radix).unwrap_or(u64::MAX) as i128;
    let value = if negative { -magnitude } else { magnitude };

    Some(value.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
}
