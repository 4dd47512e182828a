// src/timesheet/duration.rs
// Free-form duration tokens -> whole minutes

use crate::error::{ProductiveError, Result};
use regex::Regex;
use std::sync::LazyLock;

// Static literal patterns; compilation cannot fail.
#[allow(clippy::expect_used)]
static HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:h|hours?)$").expect("valid hours pattern")
});

#[allow(clippy::expect_used)]
static MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(?:m|minutes?)$").expect("valid minutes pattern")
});

#[allow(clippy::expect_used)]
static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)$").expect("valid bare number pattern")
});

/// Parse a duration token into minutes.
///
/// Accepted forms, tried in order:
/// - `2h`, `1.5 hours` (hours, may be fractional)
/// - `90m`, `45 minutes` (whole minutes only)
/// - `2.5` (bare number, read as hours)
///
/// Hour values are rounded half away from zero to the nearest minute.
pub fn parse_duration(input: &str) -> Result<u32> {
    let token = input.trim().to_lowercase();
    let malformed = || ProductiveError::MalformedDuration(input.to_string());

    if let Some(caps) = HOURS.captures(&token) {
        return hours_to_minutes(&caps[1]).ok_or_else(malformed);
    }

    if let Some(caps) = MINUTES.captures(&token) {
        return caps[1].parse::<u32>().map_err(|_| malformed());
    }

    if let Some(caps) = BARE.captures(&token) {
        return hours_to_minutes(&caps[1]).ok_or_else(malformed);
    }

    Err(malformed())
}

fn hours_to_minutes(number: &str) -> Option<u32> {
    let hours: f64 = number.parse().ok()?;
    let minutes = (hours * 60.0).round();
    if minutes.is_finite() && minutes <= f64::from(u32::MAX) {
        Some(minutes as u32)
    } else {
        None
    }
}

/// Render minutes as `"<H>h <M>m"`, omitting zero parts (`"0m"` when both are zero).
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
