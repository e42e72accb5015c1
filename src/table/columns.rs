/// Column names of a persisted sample table, as constants for type safety
/// Elapsed seconds since benchmark start
pub const TIME_S: &str = "Time (s)";
/// Transactions per second
pub const TPS: &str = "TPS";
/// Mean latency in milliseconds
pub const LATENCY_MS: &str = "Latency (ms)";
/// Latency standard deviation in milliseconds
pub const LATENCY_STDDEV_MS: &str = "Latency Stddev (ms)";

/// Header row, in column order
pub const ALL: [&str; 4] = [TIME_S, TPS, LATENCY_MS, LATENCY_STDDEV_MS];
