//! # Sample Data Model
//!
//! A [`Sample`] is one parsed progress report. A [`SampleTable`] is the ordered
//! sequence of samples extracted from a single log, in log line order.
//!
//! Tables are immutable once built: the only ways to obtain one are extraction
//! ([`crate::extract`]) and loading a persisted table ([`crate::table`]).

use serde::{Deserialize, Serialize};

/// A single progress report: elapsed time, throughput and latency figures.
///
/// The serde field names are the persisted column headers, so a `Sample`
/// serializes directly into a table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Elapsed seconds since benchmark start
    #[serde(rename = "Time (s)")]
    pub time_s: f64,

    /// Transactions per second
    #[serde(rename = "TPS")]
    pub tps: f64,

    /// Mean latency in milliseconds
    #[serde(rename = "Latency (ms)")]
    pub latency_ms: f64,

    /// Latency standard deviation in milliseconds.
    ///
    /// Extracted and persisted, but not plotted by the comparison chart.
    #[serde(rename = "Latency Stddev (ms)")]
    pub latency_stddev_ms: f64,
}

impl Sample {
    /// Create a sample from its four fields, in log order
    pub fn new(time_s: f64, tps: f64, latency_ms: f64, latency_stddev_ms: f64) -> Self {
        Self {
            time_s,
            tps,
            latency_ms,
            latency_stddev_ms,
        }
    }
}

/// Closed interval of elapsed time covered by one or more tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Earliest `time_s`
    pub start: f64,
    /// Latest `time_s`
    pub end: f64,
}

impl TimeRange {
    /// Smallest range covering both `self` and `other`
    pub fn union(self, other: TimeRange) -> TimeRange {
        TimeRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Width of the range in seconds
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Ordered, immutable sequence of samples from one progress log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no line of the source matched
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in log order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate samples in log order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Elapsed-time column
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time_s).collect()
    }

    /// Throughput column
    pub fn tps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.tps).collect()
    }

    /// Mean latency column
    pub fn latencies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.latency_ms).collect()
    }

    /// Latency standard deviation column
    pub fn latency_stddevs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.latency_stddev_ms).collect()
    }

    /// Range of `time_s` values, or `None` for an empty table.
    ///
    /// Computed over all samples rather than first/last, since log order is
    /// not guaranteed to be monotonic.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.samples.iter().fold(None, |acc, s| {
            let point = TimeRange {
                start: s.time_s,
                end: s.time_s,
            };
            Some(match acc {
                Some(range) => range.union(point),
                None => point,
            })
        })
    }
}

impl<'a> IntoIterator for &'a SampleTable {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SampleTable {
        SampleTable::from_samples(vec![
            Sample::new(2.0, 110.0, 4.5, 0.2),
            Sample::new(1.0, 100.0, 5.0, 0.1),
            Sample::new(3.0, 120.0, 4.0, 0.3),
        ])
    }

    #[test]
    fn test_columns_preserve_order() {
        let table = table();
        assert_eq!(table.times(), vec![2.0, 1.0, 3.0]);
        assert_eq!(table.tps(), vec![110.0, 100.0, 120.0]);
        assert_eq!(table.latencies(), vec![4.5, 5.0, 4.0]);
        assert_eq!(table.latency_stddevs(), vec![0.2, 0.1, 0.3]);
    }

    #[test]
    fn test_time_range_not_assuming_monotonic() {
        let range = table().time_range().unwrap();
        assert_eq!(range.start, 1.0);
        assert_eq!(range.end, 3.0);
        assert_eq!(range.span(), 2.0);
    }

    #[test]
    fn test_empty_table() {
        let table = SampleTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.time_range().is_none());
    }

    #[test]
    fn test_range_union() {
        let a = TimeRange { start: 1.0, end: 5.0 };
        let b = TimeRange { start: 3.0, end: 9.0 };
        assert_eq!(a.union(b), TimeRange { start: 1.0, end: 9.0 });
    }
}
