//! # tpsplot - Benchmark Progress Comparison
//!
//! `tpsplot` turns the periodic progress reports of a load-testing tool into
//! tables and compares two runs on a single chart.
//!
//! A progress report is a line such as:
//!
//! ```text
//! progress: 12.340 s, 987.650 tps, lat 3.210 ms stddev 0.450,
//! ```
//!
//! ## Pipeline
//!
//! 1. **Extract**: stream a log and keep every line carrying a progress report
//!    ([`extract`]).
//! 2. **Persist**: write the samples as a CSV table, the hand-off artifact
//!    between runs and rendering ([`table`]).
//! 3. **Render**: load two tables and build a two-panel chart of TPS and
//!    latency over time, saved as SVG or JSON ([`chart`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tpsplot::chart::{ChartConfig, ComparisonRenderer, RunSeries, SeriesStyle};
//! use tpsplot::extract::LogExtractor;
//! use tpsplot::table::{read_table, write_table};
//!
//! let extractor = LogExtractor::new();
//! write_table(&extractor.extract("progress_log1.txt")?, "progress_log1.csv")?;
//! write_table(&extractor.extract("progress_log2.txt")?, "progress_log2.csv")?;
//!
//! let chart = ComparisonRenderer::new(ChartConfig::default())
//!     .run_a(RunSeries::new("baseline", read_table("progress_log1.csv")?, SeriesStyle::run_a()))
//!     .run_b(RunSeries::new("patched", read_table("progress_log2.csv")?, SeriesStyle::run_b()))
//!     .render()?;
//! chart.save("comparison.svg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Table Format
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | Time (s) | f64 | Elapsed seconds since benchmark start |
//! | TPS | f64 | Transactions per second |
//! | Latency (ms) | f64 | Mean latency |
//! | Latency Stddev (ms) | f64 | Latency standard deviation (not plotted) |

#![warn(missing_docs)]

pub mod chart;
pub mod extract;
pub mod sample;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::chart::{
        Chart, ChartConfig, ChartFormat, ComparisonRenderer, Marker, RenderError, RunSeries,
        RunSlot, SeriesStyle,
    };
    pub use crate::extract::{ExtractError, ExtractStats, InputCompression, LogExtractor};
    pub use crate::sample::{Sample, SampleTable, TimeRange};
    pub use crate::table::{read_table, write_table, TableError};
}
