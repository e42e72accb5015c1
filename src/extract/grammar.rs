//! The fixed grammar of a progress report line.
//!
//! ```text
//! progress: 12.340 s, 987.650 tps, lat 3.210 ms stddev 0.450,
//! ```
//!
//! The shape may appear anywhere within a line. Each number must have a
//! fractional part.

use std::fmt;
use std::sync::OnceLock;

use regex::bytes::Regex;

/// Regular expression for one progress report, with one named group per field
pub const PROGRESS_PATTERN: &str = r"progress: (?P<time>\d+\.\d+) s, (?P<tps>\d+\.\d+) tps, lat (?P<lat>\d+\.\d+) ms stddev (?P<stddev>\d+\.\d+),";

/// The four numeric fields of a progress report, in line order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Elapsed seconds
    Time,
    /// Transactions per second
    Tps,
    /// Mean latency
    Latency,
    /// Latency standard deviation
    LatencyStddev,
}

impl Field {
    /// All fields in the order they appear on a line
    pub const ALL: [Field; 4] = [Field::Time, Field::Tps, Field::Latency, Field::LatencyStddev];

    fn group(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Tps => "tps",
            Field::Latency => "lat",
            Field::LatencyStddev => "stddev",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Time => write!(f, "elapsed time"),
            Field::Tps => write!(f, "tps"),
            Field::Latency => write!(f, "latency"),
            Field::LatencyStddev => write!(f, "latency stddev"),
        }
    }
}

fn progress_regex() -> &'static Regex {
    static PROGRESS: OnceLock<Regex> = OnceLock::new();
    PROGRESS.get_or_init(|| Regex::new(PROGRESS_PATTERN).expect("progress pattern compiles"))
}

/// Captured text of the four groups, in [`Field::ALL`] order
pub(crate) type RawFields<'a> = [&'a [u8]; 4];

/// Locate the progress shape in `line` and return its four numeric groups
pub(crate) fn match_line(line: &[u8]) -> Option<RawFields<'_>> {
    let caps = progress_regex().captures(line)?;
    let mut raw: RawFields<'_> = [&[]; 4];
    for (slot, field) in raw.iter_mut().zip(Field::ALL) {
        *slot = caps.name(field.group())?.as_bytes();
    }
    Some(raw)
}

/// Convert one captured group to a finite `f64`.
///
/// `\d` also matches non-ASCII digits, which `f64::from_str` rejects, and
/// very long digit runs parse to infinity; both are reported as `None`.
pub(crate) fn parse_number(raw: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(raw).ok()?;
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_with_surrounding_text() {
        let line = b"[client 3] progress: 12.340 s, 987.650 tps, lat 3.210 ms stddev 0.450, 0 failed";
        let raw = match_line(line).unwrap();
        assert_eq!(raw[0], b"12.340");
        assert_eq!(raw[1], b"987.650");
        assert_eq!(raw[2], b"3.210");
        assert_eq!(raw[3], b"0.450");
    }

    #[test]
    fn test_rejects_partial_lines() {
        assert!(match_line(b"").is_none());
        assert!(match_line(b"progress: 1.000 s, 100.000 tps, lat 5.000 ms").is_none());
        assert!(match_line(b"progress: 1.000 s, 100.000 tps, lat 5.000 ms stddev 0.100").is_none());
        // integers lack the required fractional part
        assert!(match_line(b"progress: 1 s, 100.000 tps, lat 5.000 ms stddev 0.100,").is_none());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(b"12.340"), Some(12.34));
        assert_eq!(parse_number(b"0.000"), Some(0.0));
        assert_eq!(parse_number("١.٥".as_bytes()), None);

        let huge = format!("{}.0", "9".repeat(400));
        assert_eq!(parse_number(huge.as_bytes()), None);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::LatencyStddev.to_string(), "latency stddev");
        assert_eq!(Field::ALL[0], Field::Time);
    }
}
