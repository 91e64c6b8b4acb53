//! Identifier and literal quoting
//!
//! Every piece of user-supplied text passes through one of these helpers before it
//! lands in a statement:
//!
//! - [`convert`]: identifiers that only need quoting when they are not plain words
//! - [`quote_key`]: field and tag keys, always double-quoted unless they carry arithmetic
//! - [`quote_measurement`]: measurement names, except meta-variables and regexes
//! - [`quote_group`]: GROUP BY dimensions
//! - [`time_condition`]: `start`/`end` bounds into `time >= ...` fragments

use regex::Regex;
use std::sync::OnceLock;

/// Whitespace or a dash marks a time bound as a literal timestamp
const TIME_LITERAL_PATTERN: &str = r"[\s-]+";

/// `time(...)` dimensions pass through GROUP BY untouched
const GROUP_TIME_PATTERN: &str = r"time\([\S\s]+?\)";

/// A standalone `and` / `or` inside a raw condition
const RELATION_WORD_PATTERN: &str = r"(?i)\sand\s|\sor\s";

fn is_match(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Quote an identifier only when it is not a plain lowercase word
///
/// The candidate is lowercased for the check; when it starts with a digit or contains
/// anything outside `[a-z0-9_]`, the original-case identifier is double-quoted.
pub fn convert(identifier: &str) -> String {
    let lower = identifier.to_lowercase();
    let starts_with_digit = lower.chars().next().is_some_and(|c| c.is_ascii_digit());
    let plain = lower
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if starts_with_digit || !plain {
        double_quote(identifier)
    } else {
        identifier.to_string()
    }
}

/// Wrap text in double quotes, escaping embedded double quotes
pub fn double_quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Wrap text in single quotes, escaping embedded single quotes
pub fn single_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "\\'"))
}

/// Quote a field or tag key
///
/// Keys containing `+` are arithmetic expressions (`"use" + 2`) and pass through.
pub fn quote_key(key: &str) -> String {
    if key.contains('+') {
        key.to_string()
    } else {
        double_quote(key)
    }
}

/// Whether the value is a `/regex/` literal
pub fn is_regex(value: &str) -> bool {
    value.len() > 2 && value.starts_with('/') && value.ends_with('/')
}

/// Whether the value is an already-quoted `"reference"`
pub fn is_reference(value: &str) -> bool {
    value.len() > 2 && value.starts_with('"') && value.ends_with('"')
}

/// Quote a string condition value unless it is a regex or a reference
pub fn quote_condition_value(value: &str) -> String {
    if is_regex(value) || is_reference(value) {
        value.to_string()
    } else {
        single_quote(value)
    }
}

/// Quote a measurement name; `:MEASUREMENT` meta-variables and regexes stay raw
pub fn quote_measurement(measurement: &str) -> String {
    if measurement.starts_with(':') || is_regex(measurement) {
        measurement.to_string()
    } else {
        double_quote(measurement)
    }
}

/// Quote a GROUP BY dimension; `*` and `time(...)` stay raw
pub fn quote_group(group: &str) -> String {
    static GROUP_TIME: OnceLock<Option<Regex>> = OnceLock::new();

    if group == "*" || is_match(&GROUP_TIME, GROUP_TIME_PATTERN, group) {
        group.to_string()
    } else {
        double_quote(group)
    }
}

/// Render a time bound as a WHERE fragment
///
/// - `-3h` becomes `time >= now() - 3h`
/// - values with whitespace or dashes are timestamps and get single-quoted
/// - anything else (`1388534400s`, `now()`) is emitted raw
pub fn time_condition(time: &str, operator: &str) -> String {
    static TIME_LITERAL: OnceLock<Option<Regex>> = OnceLock::new();

    let desc = if let Some(offset) = time.strip_prefix('-') {
        format!("now() - {}", offset)
    } else if is_match(&TIME_LITERAL, TIME_LITERAL_PATTERN, time) {
        single_quote(time)
    } else {
        time.to_string()
    };

    format!("time {} {}", operator, desc)
}

/// Parenthesize a raw condition that joins several terms with `and` / `or`
pub fn wrap_raw_condition(condition: &str) -> String {
    static RELATION_WORD: OnceLock<Option<Regex>> = OnceLock::new();

    if is_match(&RELATION_WORD, RELATION_WORD_PATTERN, condition) {
        format!("({})", condition)
    } else {
        condition.to_string()
    }
}
