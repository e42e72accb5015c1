use anyhow::{Context, Result};
use std::path::PathBuf;

use tpsplot::table::{columns, read_table};

/// Display information about a persisted table
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let table = read_table(&file).context("Failed to read table")?;

    let span = match table.time_range() {
        Some(range) => format!("{} s to {} s ({} s)", range.start, range.end, range.span()),
        None => "none (empty table)".to_string(),
    };
    let rows = [
        ("File", file.display().to_string()),
        ("Rows", table.len().to_string()),
        ("Columns", columns::ALL.join(", ")),
        ("Time span", span),
    ];

    #[cfg(feature = "colorized_output")]
    {
        use console::style;

        println!("{}", style("tpsplot Table Information").bold().cyan());
        println!("{}", style("=========================").cyan());
        for (key, value) in &rows {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("tpsplot Table Information");
        println!("=========================");
        for (key, value) in &rows {
            println!("{}: {}", key, value);
        }
    }

    Ok(())
}
