use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use tpsplot::chart::{ComparisonRenderer, RunSeries, RunSlot};
use tpsplot::sample::SampleTable;
use tpsplot::table::read_table;

use super::config::Config;

/// Render two persisted tables as a comparison chart
pub fn run(
    table_a: PathBuf,
    table_b: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(config.as_deref())?;

    info!("tpsplot - comparison rendering");
    info!("Run A:  {}", table_a.display());
    info!("Run B:  {}", table_b.display());
    info!("Output: {}", output.display());

    let run_a = load_series(&table_a, RunSlot::A, &config)?;
    let run_b = load_series(&table_b, RunSlot::B, &config)?;

    render_to_file(run_a, run_b, &config, &output)
}

fn load_series(path: &Path, slot: RunSlot, config: &Config) -> Result<RunSeries> {
    let table = read_table(path).with_context(|| format!("Failed to load table for {}", slot))?;
    Ok(build_series(table, path, slot, config))
}

/// Label from the config, falling back to the source file stem
pub(crate) fn build_series(
    table: SampleTable,
    source: &Path,
    slot: RunSlot,
    config: &Config,
) -> RunSeries {
    let label = config.run(slot).label.clone().unwrap_or_else(|| {
        source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| slot.to_string())
    });
    RunSeries::new(label, table, config.style(slot))
}

pub(crate) fn render_to_file(
    run_a: RunSeries,
    run_b: RunSeries,
    config: &Config,
    output: &Path,
) -> Result<()> {
    let chart = ComparisonRenderer::new(config.chart_config())
        .run_a(run_a)
        .run_b(run_b)
        .render()
        .context("Failed to render comparison")?;

    let format = chart.save(output).context("Failed to save chart")?;

    info!("Chart written: {} ({:?})", output.display(), format);
    for panel in &chart.panels {
        info!("  {}", panel.title);
        for trace in &panel.traces {
            info!("    {}: {} points", trace.label, trace.len());
        }
    }

    Ok(())
}
