//! # Persisted Sample Tables
//!
//! The hand-off between extraction and rendering is a small CSV file:
//!
//! ```text
//! Time (s),TPS,Latency (ms),Latency Stddev (ms)
//! 1.0,100.0,5.0,0.1
//! ```
//!
//! One header row, then one row per sample in table order. Numbers are always
//! written in plain decimal notation with `.` as separator and with enough
//! digits to read back the identical `f64`. Files are rewritten in full on
//! every write: rows go to a temporary file next to the destination, which is
//! then renamed over it.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use tempfile::NamedTempFile;

use crate::sample::{Sample, SampleTable};

pub mod columns;
mod error;

pub use error::TableError;

/// Write `table` to `path`, replacing any existing file
pub fn write_table<P: AsRef<Path>>(table: &SampleTable, path: P) -> Result<(), TableError> {
    let path = path.as_ref();
    let resource = |source| TableError::Resource {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(resource)?;
    write_table_to(table, &mut temp_file)?;
    temp_file.as_file().sync_all().map_err(resource)?;
    temp_file.persist(path).map_err(|e| resource(e.error))?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Write `table` as CSV to any writer
pub fn write_table_to<W: Write>(table: &SampleTable, writer: W) -> Result<(), TableError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    // the header goes out explicitly so that empty tables still carry it
    csv_writer.write_record(columns::ALL)?;
    for sample in table {
        csv_writer.write_record([
            format_decimal(sample.time_s),
            format_decimal(sample.tps),
            format_decimal(sample.latency_ms),
            format_decimal(sample.latency_stddev_ms),
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Load a table previously written with [`write_table`]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<SampleTable, TableError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TableError::Resource {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_table_from(BufReader::new(file))?;
    debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Load a table from any CSV source
pub fn read_table_from<R: Read>(reader: R) -> Result<SampleTable, TableError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.len() != columns::ALL.len() || headers.iter().zip(columns::ALL).any(|(h, c)| h != c) {
        return Err(TableError::Header { found: headers });
    }

    let mut samples = Vec::new();
    for (index, record) in csv_reader.deserialize::<Sample>().enumerate() {
        let sample = record?;
        check_sample(&sample, index + 1)?;
        samples.push(sample);
    }

    Ok(SampleTable::from_samples(samples))
}

fn check_sample(sample: &Sample, row: usize) -> Result<(), TableError> {
    let fields = [
        (columns::TIME_S, sample.time_s),
        (columns::TPS, sample.tps),
        (columns::LATENCY_MS, sample.latency_ms),
        (columns::LATENCY_STDDEV_MS, sample.latency_stddev_ms),
    ];
    match fields
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        Some((column, value)) => Err(TableError::InvalidValue { row, column, value }),
        None => Ok(()),
    }
}

/// Shortest round-tripping decimal form, never in exponent notation
fn format_decimal(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}
