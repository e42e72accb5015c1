use std::path::PathBuf;

/// Errors that can occur while persisting or loading a sample table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table file is missing, unreadable, or cannot be written
    #[error("Cannot access table {}: {source}", .path.display())]
    Resource {
        /// Path of the table file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The header row is not the expected four columns
    #[error("Unexpected table header: expected [{}], found [{}]", super::columns::ALL.join(","), .found.join(","))]
    Header {
        /// Header fields as found in the file
        found: Vec<String>,
    },

    /// A record could not be read or written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field holds a value no extracted sample can have
    #[error("Row {row}: invalid {column} value {value}")]
    InvalidValue {
        /// 1-based data row
        row: usize,
        /// Column name
        column: &'static str,
        /// The offending value
        value: f64,
    },
}
