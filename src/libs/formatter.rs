//! Minute-count formatting shared by totals, balances and reports.

/// Formats a minute count as zero-padded `HH:MM`.
///
/// Negative values render as `-HH:MM` with the digits taken from the
/// absolute value, so `-48` becomes `-00:48` instead of a signed remainder.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Formats a balance as `+HH:MM` or `-HH:MM`. Zero is non-negative.
pub fn format_balance(minutes: i64) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Reads back an `HH:MM` or `-HH:MM` total. The `--:--` sentinel and any
/// other malformed text give `None`.
pub fn parse_minutes(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text),
    };
    let (hours, minutes) = digits.split_once(':')?;
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}
