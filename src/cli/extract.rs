use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use tpsplot::extract::LogExtractor;
use tpsplot::table::write_table;

/// Extract a progress log into a CSV table
pub fn run(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| default_table_path(&input));

    info!("tpsplot - progress log extraction");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let rows = extract_to_table(&input, &output)?;
    info!("Table '{}' written with {} rows", output.display(), rows);

    Ok(())
}

/// Extract `input` and persist it at `output`; returns the number of rows
pub(crate) fn extract_to_table(input: &Path, output: &Path) -> Result<usize> {
    let (table, stats) = LogExtractor::new()
        .extract_with_stats(input)
        .with_context(|| format!("Extraction of {} failed", input.display()))?;

    info!(
        "  Lines read: {} ({} samples, {} skipped)",
        stats.lines_read, stats.samples, stats.skipped_lines
    );
    if table.is_empty() {
        info!("  No progress reports found in {}", input.display());
    }

    write_table(&table, output)
        .with_context(|| format!("Failed to write table {}", output.display()))?;

    Ok(table.len())
}

/// `progress_log1.txt` -> `progress_log1.csv`, `run.log.gz` -> `run.csv`
pub(crate) fn default_table_path(input: &Path) -> PathBuf {
    let mut stem = PathBuf::from(input.file_stem().unwrap_or_default());
    let compressed = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if compressed {
        stem = PathBuf::from(stem.file_stem().unwrap_or_default());
    }
    input.with_file_name(format!("{}.csv", stem.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_path() {
        assert_eq!(
            default_table_path(Path::new("testdata/progress_log1.txt")),
            PathBuf::from("testdata/progress_log1.csv")
        );
        assert_eq!(
            default_table_path(Path::new("run.log.gz")),
            PathBuf::from("run.csv")
        );
        assert_eq!(default_table_path(Path::new("bench")), PathBuf::from("bench.csv"));
    }
}
