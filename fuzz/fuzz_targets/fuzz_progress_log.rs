#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use tpsplot::extract::{ExtractError, LogExtractor};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either extract or fail with a parse error, never panic
    match LogExtractor::new().extract_from_reader(Cursor::new(data)) {
        Ok(table) => {
            for sample in &table {
                assert!(sample.time_s.is_finite() && sample.time_s >= 0.0);
                assert!(sample.tps.is_finite() && sample.tps >= 0.0);
                assert!(sample.latency_ms.is_finite() && sample.latency_ms >= 0.0);
                assert!(sample.latency_stddev_ms.is_finite() && sample.latency_stddev_ms >= 0.0);
            }
        }
        Err(ExtractError::Parse { .. }) => {}
        Err(other) => panic!("in-memory extraction cannot fail with {other}"),
    }
});
