use std::path::PathBuf;

use super::RunSlot;

/// Errors that can occur while building or writing a comparison chart
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// One of the two runs was never supplied
    #[error("Missing series for {0}: a comparison needs both run A and run B")]
    MissingSeries(RunSlot),

    /// Canvas too small to lay out two panels
    #[error("Invalid chart size {width}x{height}: minimum is {min}x{min}", min = super::MIN_DIMENSION)]
    InvalidSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The chart file could not be written
    #[error("Cannot write chart {}: {source}", .path.display())]
    Output {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error while streaming chart output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
