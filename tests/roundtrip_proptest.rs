//! Property tests: values formatted into a progress line come back unchanged,
//! and tables survive a write/read cycle.

use proptest::prelude::*;
use std::io::Cursor;

use tpsplot::extract::LogExtractor;
use tpsplot::sample::Sample;
use tpsplot::table::{read_table_from, write_table_to};

/// Non-negative value with three decimals, as the benchmark tool prints them
fn reported_value() -> impl Strategy<Value = f64> {
    (0u64..100_000_000).prop_map(|millis| millis as f64 / 1000.0)
}

fn sample() -> impl Strategy<Value = Sample> {
    (reported_value(), reported_value(), reported_value(), reported_value())
        .prop_map(|(t, tps, lat, sd)| Sample::new(t, tps, lat, sd))
}

proptest! {
    /// Any quadruple formatted into the grammar is recovered exactly
    #[test]
    fn test_line_roundtrip(s in sample(), prefix in "[a-z \\[\\]0-9]{0,12}", suffix in "[a-z ]{0,12}") {
        let line = format!(
            "{}progress: {:.3} s, {:.3} tps, lat {:.3} ms stddev {:.3},{}\n",
            prefix, s.time_s, s.tps, s.latency_ms, s.latency_stddev_ms, suffix
        );
        let table = LogExtractor::new().extract_from_reader(Cursor::new(line)).unwrap();

        prop_assert_eq!(table.len(), 1);
        prop_assert_eq!(table.samples()[0], s);
    }

    /// Persisting and loading reproduces length, order and values
    #[test]
    fn test_table_roundtrip(samples in prop::collection::vec(sample(), 0..50)) {
        let log: String = samples
            .iter()
            .map(|s| format!(
                "progress: {:.3} s, {:.3} tps, lat {:.3} ms stddev {:.3},\n",
                s.time_s, s.tps, s.latency_ms, s.latency_stddev_ms
            ))
            .collect();
        let table = LogExtractor::new().extract_from_reader(Cursor::new(log)).unwrap();
        prop_assert_eq!(table.samples(), samples.as_slice());

        let mut csv = Vec::new();
        write_table_to(&table, &mut csv).unwrap();
        let loaded = read_table_from(csv.as_slice()).unwrap();
        prop_assert_eq!(loaded, table);
    }

    /// Lines lacking the stddev clause never produce samples
    #[test]
    fn test_truncated_lines_ignored(s in sample()) {
        let line = format!(
            "progress: {:.3} s, {:.3} tps, lat {:.3} ms\n",
            s.time_s, s.tps, s.latency_ms
        );
        let table = LogExtractor::new().extract_from_reader(Cursor::new(line)).unwrap();
        prop_assert!(table.is_empty());
    }
}
