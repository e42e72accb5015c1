//! # Progress Log Extraction
//!
//! Streams a benchmark progress log line by line and turns every line that
//! contains a progress report into a [`Sample`].
//!
//! Lines without the progress shape are skipped; they are not errors. Only a
//! line that has the shape but carries a number that cannot be converted
//! aborts the extraction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tpsplot::extract::LogExtractor;
//!
//! let table = LogExtractor::new().extract("progress_log1.txt")?;
//! println!("{} samples", table.len());
//! # Ok::<(), tpsplot::extract::ExtractError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::sample::{Sample, SampleTable};

mod error;
mod grammar;

pub use error::ExtractError;
pub use grammar::{Field, PROGRESS_PATTERN};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// How the bytes of a log file are stored on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputCompression {
    /// Gzip when the file name ends in `.gz`, plain text otherwise
    #[default]
    Auto,
    /// Plain text
    None,
    /// Gzip (single or multi-member)
    Gzip,
}

impl InputCompression {
    fn is_gzip(&self, path: &Path) -> bool {
        match self {
            InputCompression::Auto => path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("gz"))
                .unwrap_or(false),
            InputCompression::None => false,
            InputCompression::Gzip => true,
        }
    }
}

/// Counters collected during one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read from the log
    pub lines_read: usize,
    /// Lines that produced a sample
    pub samples: usize,
    /// Lines without a progress report
    pub skipped_lines: usize,
}

/// Line-oriented extractor for progress logs
#[derive(Debug, Clone, Default)]
pub struct LogExtractor {
    compression: InputCompression,
}

impl LogExtractor {
    /// Create an extractor that detects gzip input from the file extension
    pub fn new() -> Self {
        Self::default()
    }

    /// Override gzip detection
    pub fn with_compression(mut self, compression: InputCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Extract all samples from the log at `path`
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<SampleTable, ExtractError> {
        self.extract_with_stats(path).map(|(table, _)| table)
    }

    /// Extract all samples from the log at `path`, also returning line counters
    pub fn extract_with_stats<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(SampleTable, ExtractStats), ExtractError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExtractError::Resource {
            path: path.to_path_buf(),
            source,
        })?;

        let gzip = self.compression.is_gzip(path);
        debug!(
            "Extracting progress reports from {} (gzip: {})",
            path.display(),
            gzip
        );

        let inner: Box<dyn Read> = if gzip {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, inner);

        extract_lines(reader, path)
    }

    /// Extract all samples from an already opened source
    pub fn extract_from_reader<R: BufRead>(&self, reader: R) -> Result<SampleTable, ExtractError> {
        extract_lines(reader, Path::new("<reader>")).map(|(table, _)| table)
    }
}

/// Extract all samples from the log at `path` with default settings
pub fn extract<P: AsRef<Path>>(path: P) -> Result<SampleTable, ExtractError> {
    LogExtractor::new().extract(path)
}

fn extract_lines<R: BufRead>(
    mut reader: R,
    origin: &Path,
) -> Result<(SampleTable, ExtractStats), ExtractError> {
    let mut samples = Vec::new();
    let mut stats = ExtractStats::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ExtractError::Resource {
                path: PathBuf::from(origin),
                source,
            })?;
        if read == 0 {
            break;
        }
        stats.lines_read += 1;

        let line = trim_line_ending(&buf);
        match parse_line(line, stats.lines_read)? {
            Some(sample) => samples.push(sample),
            None => stats.skipped_lines += 1,
        }
    }

    stats.samples = samples.len();
    debug!(
        "{}: {} lines, {} samples, {} skipped",
        origin.display(),
        stats.lines_read,
        stats.samples,
        stats.skipped_lines
    );

    Ok((SampleTable::from_samples(samples), stats))
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse one line; `Ok(None)` means the line holds no progress report
fn parse_line(line: &[u8], line_number: usize) -> Result<Option<Sample>, ExtractError> {
    let raw = match grammar::match_line(line) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let mut values = [0.0f64; 4];
    for ((value, text), field) in values.iter_mut().zip(raw).zip(Field::ALL) {
        *value = grammar::parse_number(text).ok_or_else(|| ExtractError::Parse {
            line_number,
            line: String::from_utf8_lossy(line).into_owned(),
            field,
            value: String::from_utf8_lossy(text).into_owned(),
        })?;
    }

    let [time_s, tps, latency_ms, latency_stddev_ms] = values;
    Ok(Some(Sample::new(time_s, tps, latency_ms, latency_stddev_ms)))
}
