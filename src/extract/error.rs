use std::path::PathBuf;

use super::grammar::Field;

/// Errors that can occur while extracting samples from a progress log
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The log is missing or cannot be read
    #[error("Cannot read progress log {}: {source}", .path.display())]
    Resource {
        /// Path of the log (or a placeholder for in-memory readers)
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A line has the progress shape but a numeric group is not a finite number
    #[error("Line {line_number}: cannot convert {field} value '{value}' to a number: {line}")]
    Parse {
        /// 1-based line number within the log
        line_number: usize,
        /// Raw text of the offending line
        line: String,
        /// Which of the four groups failed
        field: Field,
        /// The captured text of that group
        value: String,
    },
}
