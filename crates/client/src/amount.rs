//! Canonical decimal amounts.
//!
//! Amounts travel over the wire as decimal strings. Internally they
//! are **integer cents** (`i64`) to avoid floating-point drift;
//! parsing is lenient (malformed input degrades to `None`, never
//! panics) and the canonical string form is produced by a single
//! parse-then-stringify pass.

/// Upper bound accepted by the expense form: 999999.99.
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999;

/// Parses a non-negative decimal string into cents.
///
/// Accepts `digits`, `digits.digits`, `.digits` and `digits.`; any
/// fractional digit beyond the second rounds half-up into the cents.
/// Signs, grouping separators and anything else yield `None`.
pub fn parse_cents(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.split('.');
    let units_str = parts.next().unwrap_or("");
    let frac_str = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return None;
    }
    if units_str.is_empty() && frac_str.is_empty() {
        return None;
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().ok()?
    };

    let mut digits = frac_str.chars().map(|c| i64::from(c as u8 - b'0'));
    let tens = digits.next().unwrap_or(0);
    let ones = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);
    let cents = tens * 10 + ones + i64::from(round_up);

    units.checked_mul(100)?.checked_add(cents)
}

/// Formats cents with exactly two decimals (display/total form).
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Formats cents with trailing fractional zeros trimmed (wire form).
pub fn format_trimmed(cents: i64) -> String {
    let abs = cents.unsigned_abs();
    let units = abs / 100;
    let frac = abs % 100;
    if frac == 0 {
        format!("{units}")
    } else if frac % 10 == 0 {
        format!("{units}.{}", frac / 10)
    } else {
        format!("{units}.{frac:02}")
    }
}

/// Re-normalizes a wire amount into its canonical string form.
///
/// Unparsable input (including negative values) degrades to `"0"`.
/// Idempotent: canonical output parses back to the same cents.
pub fn canonical(s: &str) -> String {
    match parse_cents(s) {
        Some(cents) => format_trimmed(cents),
        None => "0".to_string(),
    }
}

/// Input mask for the amount field.
///
/// Strips everything but digits and dots from `input`; if the result
/// carries a second dot or a third fractional digit the previous
/// value is kept. This gates what can be typed and is separate from
/// validation, which checks the final value on submit.
pub fn mask_input(prev: &str, input: &str) -> String {
    let numeric: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parts: Vec<&str> = numeric.split('.').collect();
    if parts.len() > 2 {
        return prev.to_string();
    }
    if parts.len() == 2 && parts[1].len() > 2 {
        return prev.to_string();
    }
    numeric
}
