//! Flag message wording.

use super::catalog::CategorySpec;

/// Formats cents as dollars with thousands separators, e.g. `$1,234.56`.
///
/// ```
/// use pay_recon::comparison::format_cents;
///
/// assert_eq!(format_cents(123_456), "$1,234.56");
/// assert_eq!(format_cents(-5), "-$0.05");
/// ```
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{:02}", sign, grouped, abs % 100)
}

pub(crate) fn missing(spec: &CategorySpec, expected: i64) -> String {
    format!(
        "{} of {} was expected but does not appear on the statement",
        spec.label,
        format_cents(expected)
    )
}

pub(crate) fn mismatch(spec: &CategorySpec, expected: i64, actual: i64) -> String {
    let delta = expected.saturating_sub(actual);
    let direction = if delta > 0 { "less" } else { "more" };
    format!(
        "{} shows {} but {} was expected ({} {} than expected)",
        spec.label,
        format_cents(actual),
        format_cents(expected),
        format_cents(delta.saturating_abs()),
        direction
    )
}

pub(crate) fn verified(spec: &CategorySpec, actual: i64) -> String {
    format!("{} of {} matches the expected amount", spec.label, format_cents(actual))
}

pub(crate) fn unexpected(spec: &CategorySpec, actual: i64, expected: Option<i64>) -> String {
    match expected {
        Some(_) => format!(
            "{} of {} appears on the statement but none is expected for this profile",
            spec.label,
            format_cents(actual)
        ),
        None => format!(
            "{} of {} appears on the statement but no expected amount could be computed",
            spec.label,
            format_cents(actual)
        ),
    }
}

pub(crate) const UNEXPECTED_SUGGESTION: &str =
    "Check that your profile is up to date; if it is, ask your finance office why this was paid";
