//! # Duration Parsing
//!
//! Parses and renders the duration strings accepted by the leader-election and
//! renewal switches (`60s`, `1h30m`, `1.5h`, `720h`).
//!
//! Units follow Go's `time.ParseDuration` (`ns`, `us`, `µs`, `ms`, `s`, `m`,
//! `h`) plus `d` for days. Each segment may carry a fractional part; anything
//! below one nanosecond is truncated.

use regex::Regex;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DurationError {
    #[error("duration cannot be empty")]
    Empty,

    #[error(
        "invalid duration {0:?}: expected <number><unit> segments such as \"90s\", \"1h30m\" or \"1.5h\" (units: ns, us, ms, s, m, h, d)"
    )]
    Malformed(String),

    #[error("duration {0:?} is out of range")]
    Overflow(String),

    #[error("failed to compile duration pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// "ms" must come before "m" so that "5ms" is not read as five minutes
const SEGMENT: &str = r"(?P<whole>\d*)(?:\.(?P<fraction>\d*))?(?P<unit>ns|us|µs|μs|ms|s|m|h|d)";

/// Fraction digits beyond this add nothing at nanosecond precision
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60_000_000_000),
        "h" => Some(3_600_000_000_000),
        "d" => Some(86_400_000_000_000),
        _ => None,
    }
}

/// Parse a duration made of one or more `<number><unit>` segments.
/// A bare `0` is accepted as zero.
pub fn parse_duration(value: &str) -> Result<Duration, DurationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(DurationError::Empty);
    }
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    let malformed = || DurationError::Malformed(trimmed.to_string());
    let overflow = || DurationError::Overflow(trimmed.to_string());

    let whole_pattern = Regex::new(&format!("^(?:{SEGMENT})+$"))?;
    if !whole_pattern.is_match(trimmed) {
        return Err(malformed());
    }

    let segment = Regex::new(SEGMENT)?;
    let mut total_nanos: u128 = 0;

    for captures in segment.captures_iter(trimmed) {
        let whole = captures.name("whole").map_or("", |m| m.as_str());
        let fraction = captures.name("fraction").map_or("", |m| m.as_str());
        // "s" and ".s" carry no digits at all
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }

        let unit = captures
            .name("unit")
            .and_then(|m| unit_nanos(m.as_str()))
            .ok_or_else(malformed)?;

        let mut nanos = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|n| n.checked_mul(unit))
                .ok_or_else(overflow)?
        };

        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let scale = 10u128.pow(u32::try_from(digits.len()).ok().ok_or_else(overflow)?);
            let numerator = digits.parse::<u128>().ok().ok_or_else(malformed)?;
            nanos = nanos
                .checked_add(numerator * unit / scale)
                .ok_or_else(overflow)?;
        }

        total_nanos = total_nanos.checked_add(nanos).ok_or_else(overflow)?;
    }

    let total_nanos = u64::try_from(total_nanos).ok().ok_or_else(overflow)?;
    Ok(Duration::from_nanos(total_nanos))
}

/// Render a duration the way it would be typed on the command line.
pub fn format_duration(duration: &Duration) -> String {
    let total_nanos = duration.as_nanos();
    if total_nanos == 0 {
        return "0s".to_string();
    }

    let parts = [
        (total_nanos / 3_600_000_000_000, "h"),
        ((total_nanos % 3_600_000_000_000) / 60_000_000_000, "m"),
        ((total_nanos % 60_000_000_000) / 1_000_000_000, "s"),
        ((total_nanos % 1_000_000_000) / 1_000_000, "ms"),
        ((total_nanos % 1_000_000) / 1_000, "us"),
        (total_nanos % 1_000, "ns"),
    ];

    parts
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{amount}{unit}"))
        .collect()
}
