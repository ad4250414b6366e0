//! Display formatting for receipts.
//!
//! Pure functions; nothing here touches session state.

use std::sync::LazyLock;

use chrono::{NaiveDate, ParseError};
use regex::Regex;

use crate::models::MonthSelection;

/// Date layout printed on receipts and in export file names.
pub const RECEIPT_DATE_FORMAT: &str = "%d.%m.%Y";

static UNSAFE_FILE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("file name pattern is valid"));

/// Joins display items as `"A"`, `"A & B"` or `"A, B & C"`.
pub fn join_with_ampersand(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} & {}", init.join(", "), last),
    }
}

/// Renders selected months chronologically, e.g.
/// `"January 2024, February 2024 & March 2024"`.
///
/// Sorts a copy by year and then calendar order; the caller's slice keeps
/// the order the months were picked in.
///
/// # Example
///
/// ```
/// use receipt_core::{Month, MonthSelection, format::format_months};
///
/// let months = [
///     MonthSelection::new(Month::March, 2024),
///     MonthSelection::new(Month::January, 2024),
/// ];
///
/// assert_eq!(format_months(&months), "January 2024 & March 2024");
/// ```
pub fn format_months(months: &[MonthSelection]) -> String {
    let mut sorted = months.to_vec();
    sorted.sort_by_key(MonthSelection::sort_key);
    let rendered: Vec<String> = sorted.iter().map(ToString::to_string).collect();
    join_with_ampersand(&rendered)
}

/// Parses the value of a date input (`YYYY-MM-DD`). A trailing time part
/// (`2024-03-05T10:30`) is ignored.
pub fn parse_form_date(input: &str) -> Result<NaiveDate, ParseError> {
    let date_part = input.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(RECEIPT_DATE_FORMAT).to_string()
}

/// Formats an ISO date string as `DD.MM.YYYY`.
///
/// Returns an empty string for empty input and `None` when the text is not a
/// calendar date.
pub fn format_iso_date(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return Some(String::new());
    }
    parse_form_date(input).ok().map(format_date)
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    UNSAFE_FILE_NAME_CHARS.replace_all(name, "_").into_owned()
}

/// File name for an exported receipt image:
/// `<SanitizedStudentName>_payment_receipt_<DD.MM.YYYY>.jpg`.
pub fn receipt_file_name(
    student_name: &str,
    date: NaiveDate,
) -> String {
    format!(
        "{}_payment_receipt_{}.jpg",
        sanitize_file_stem(student_name),
        format_date(date)
    )
}

/// Wraps an amount in the receipt's currency markers, e.g. `"Rs. 700 /="`.
pub fn format_amount(
    amount: &str,
    prefix: &str,
    suffix: &str,
) -> String {
    [prefix, amount, suffix]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Label for the month picker trigger.
pub fn format_selection_summary(count: usize) -> String {
    match count {
        0 => "Select months".to_string(),
        1 => "1 month selected".to_string(),
        n => format!("{n} months selected"),
    }
}
