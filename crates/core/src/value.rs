//! Value coercion at the form and wire boundary.
//!
//! Form drafts hold raw strings; these helpers turn them into typed values
//! with explicit errors instead of silently producing `NaN` or empty data.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::error::{DomainError, DomainResult};

/// Fail with [`DomainError::MissingField`] when `value` is blank.
pub fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::missing_field(field))
    } else {
        Ok(())
    }
}

/// Coerce a numeric form field.
///
/// Blank input is zero (an untouched number input); anything else must parse
/// as a finite number.
pub fn coerce_number(field: &str, raw: &str) -> DomainResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(DomainError::invalid_number(field, raw)),
    }
}

/// Like [`coerce_number`] but a blank value is a missing required field.
pub fn require_number(field: &str, raw: &str) -> DomainResult<f64> {
    require(field, raw)?;
    coerce_number(field, raw)
}

/// Parse a checkbox-like form value.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Parse the date formats the backend and date inputs produce.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive `YYYY-MM-DDTHH:MM:SS`
/// values (the date prefix is used).
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }
    trimmed
        .get(..10)
        .filter(|_| trimmed.as_bytes().get(10) == Some(&b'T'))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| DomainError::invalid_date(raw))
}

/// Parse an optional date filter input (blank means "no bound").
pub fn parse_optional_date(raw: &str) -> DomainResult<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(raw).map(Some)
    }
}

/// Split a comma-separated list input, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_list`] for populating an edit form.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Format a number the way it is shown in cells (`450`, `12.5`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

/// Serde helper: accept a JSON number, a numeric string, or `null`.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on numeric record fields.
pub fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(LooseNumber::Number(n)) => Ok(n),
        Some(LooseNumber::Text(s)) => {
            coerce_number("number", &s).map_err(serde::de::Error::custom)
        }
    }
}

/// Serde helper: treat `null` as the type's default.
pub fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
