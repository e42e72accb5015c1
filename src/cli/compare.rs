use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use tpsplot::chart::RunSlot;
use tpsplot::table::read_table;

use super::config::Config;
use super::extract::{default_table_path, extract_to_table};
use super::render::{build_series, render_to_file};

/// Extract two logs next to themselves, then render their comparison
pub fn run(log_a: PathBuf, log_b: PathBuf, output: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?;

    info!("tpsplot - extract and compare");

    let mut series = Vec::with_capacity(2);
    for (slot, log) in [(RunSlot::A, &log_a), (RunSlot::B, &log_b)] {
        let table_path = default_table_path(log);
        let rows = extract_to_table(log, &table_path)
            .with_context(|| format!("Failed to extract {}", slot))?;
        info!("{}: {} -> {} ({} rows)", slot, log.display(), table_path.display(), rows);

        // render from the persisted table, the same input `render` would see
        let table = read_table(&table_path)
            .with_context(|| format!("Failed to load table for {}", slot))?;
        series.push(build_series(table, log, slot, &config));
    }

    let run_b = series.pop().context("Missing series for run B")?;
    let run_a = series.pop().context("Missing series for run A")?;
    render_to_file(run_a, run_b, &config, &output)
}
