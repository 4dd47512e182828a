// src/timesheet/date.rs
// Relative/absolute date tokens -> canonical YYYY-MM-DD

use crate::error::{ProductiveError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date pattern")
});

/// Canonical calendar date in `YYYY-MM-DD` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateSpec(String);

impl DateSpec {
    pub fn from_date(date: NaiveDate) -> Self {
        DateSpec(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse `today`, `yesterday` (case-insensitive) or an explicit `YYYY-MM-DD`.
///
/// Explicit dates are range-checked only (month 1-12, day 1-31), so a value
/// like `2024-02-31` is passed through for the Productive API to judge.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<DateSpec> {
    let token = input.trim();
    let malformed = || ProductiveError::MalformedDate(input.to_string());

    if token.eq_ignore_ascii_case("today") {
        return Ok(DateSpec::from_date(today));
    }
    if token.eq_ignore_ascii_case("yesterday") {
        let day = today.pred_opt().ok_or_else(malformed)?;
        return Ok(DateSpec::from_date(day));
    }

    let caps = ISO_DATE.captures(token).ok_or_else(malformed)?;
    let month: u32 = caps[2].parse().map_err(|_| malformed())?;
    let day: u32 = caps[3].parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(malformed());
    }

    if NaiveDate::parse_from_str(token, "%Y-%m-%d").is_err() {
        tracing::debug!(date = %token, "Date is in range but not a real calendar day");
    }

    Ok(DateSpec(token.to_string()))
}
