//! # Two-Run Comparison Charts
//!
//! Builds a two-panel chart comparing two benchmark runs:
//!
//! 1. **Top panel**: TPS over elapsed time
//! 2. **Bottom panel**: mean latency over elapsed time
//!
//! Each panel carries one trace per run, run A first and run B second, so B is
//! drawn over A. Both panels share the x domain covering the two runs' time
//! ranges. The latency standard deviation is part of every [`Sample`] but is
//! never plotted.
//!
//! The [`Chart`] value is a plain description of panels and traces. It can be
//! written as SVG ([`Chart::to_svg`]) or serialized to JSON ([`Chart::to_json`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tpsplot::chart::{ChartConfig, ComparisonRenderer, RunSeries, SeriesStyle};
//! use tpsplot::table::read_table;
//!
//! let a = RunSeries::new("baseline", read_table("run_a.csv")?, SeriesStyle::run_a());
//! let b = RunSeries::new("patched", read_table("run_b.csv")?, SeriesStyle::run_b());
//!
//! let chart = ComparisonRenderer::new(ChartConfig::default())
//!     .run_a(a)
//!     .run_b(b)
//!     .render()?;
//! chart.save("comparison.svg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Sample`]: crate::sample::Sample

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::sample::{SampleTable, TimeRange};

mod error;
mod svg;

pub use error::RenderError;

/// Smallest accepted canvas width and height, in pixels
pub const MIN_DIMENSION: u32 = 300;

/// Label of the shared x axis
pub const TIME_AXIS_LABEL: &str = "Time (s)";
/// Label of the TPS panel's y axis
pub const TPS_AXIS_LABEL: &str = "TPS";
/// Label of the latency panel's y axis
pub const LATENCY_AXIS_LABEL: &str = "Latency (ms)";

/// Marker shape drawn at every data point of a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Filled circle
    #[default]
    Circle,
    /// Diagonal cross
    Cross,
    /// Filled square
    Square,
    /// Filled upward triangle
    Triangle,
}

impl Marker {
    /// Returns all available marker names.
    pub fn variants() -> &'static [&'static str] {
        &["circle", "cross", "square", "triangle"]
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Circle => write!(f, "circle"),
            Marker::Cross => write!(f, "cross"),
            Marker::Square => write!(f, "square"),
            Marker::Triangle => write!(f, "triangle"),
        }
    }
}

impl FromStr for Marker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" | "o" => Ok(Marker::Circle),
            "cross" | "x" => Ok(Marker::Cross),
            "square" | "s" => Ok(Marker::Square),
            "triangle" | "^" => Ok(Marker::Triangle),
            _ => Err(format!(
                "Unknown marker '{}'. Valid options: {}",
                s,
                Marker::variants().join(", ")
            )),
        }
    }
}

/// Colors and marker used for one run across both panels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// SVG color of the run's trace in the TPS panel
    pub tps_color: String,
    /// SVG color of the run's trace in the latency panel
    pub latency_color: String,
    /// Marker shape in both panels
    pub marker: Marker,
}

impl SeriesStyle {
    /// Default style for run A: blue/red, circle markers
    pub fn run_a() -> Self {
        Self {
            tps_color: "blue".to_string(),
            latency_color: "red".to_string(),
            marker: Marker::Circle,
        }
    }

    /// Default style for run B: green/orange, cross markers
    pub fn run_b() -> Self {
        Self {
            tps_color: "green".to_string(),
            latency_color: "orange".to_string(),
            marker: Marker::Cross,
        }
    }
}

/// One benchmark run as it appears on the chart
#[derive(Debug, Clone)]
pub struct RunSeries {
    /// Legend label
    pub label: String,
    /// Extracted samples
    pub table: SampleTable,
    /// Colors and marker
    pub style: SeriesStyle,
}

impl RunSeries {
    /// Create a labeled series
    pub fn new(label: impl Into<String>, table: SampleTable, style: SeriesStyle) -> Self {
        Self {
            label: label.into(),
            table,
            style,
        }
    }
}

/// Position of a run in the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSlot {
    /// First run, drawn underneath
    A,
    /// Second run, drawn on top
    B,
}

impl fmt::Display for RunSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunSlot::A => write!(f, "run A"),
            RunSlot::B => write!(f, "run B"),
        }
    }
}

/// Canvas size and panel titles
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Title prefix of the TPS panel
    pub tps_title: String,
    /// Title prefix of the latency panel
    pub latency_title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            tps_title: "TPS Comparison".to_string(),
            latency_title: "Latency Comparison".to_string(),
        }
    }
}

/// How panels are arranged on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Panels stacked top to bottom
    Vertical,
}

/// Closed value interval of an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl AxisRange {
    /// Range covering `values`; `[0, 1]` when empty, widened by one unit on
    /// each side when all values are equal.
    pub fn covering<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let bounds = values.into_iter().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            })
        });
        match bounds {
            Some((lo, hi)) => Self::from_bounds(lo, hi),
            None => Self { min: 0.0, max: 1.0 },
        }
    }

    fn from_bounds(min: f64, max: f64) -> Self {
        if max > min {
            Self { min, max }
        } else {
            Self {
                min: min - 1.0,
                max: max + 1.0,
            }
        }
    }

    fn from_time_range(range: Option<TimeRange>) -> Self {
        match range {
            Some(range) => Self::from_bounds(range.start, range.end),
            None => Self { min: 0.0, max: 1.0 },
        }
    }

    /// `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// A labeled axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis caption
    pub label: String,
    /// Value interval shown
    pub range: AxisRange,
}

/// One line-plus-marker series within a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend label, equal to the run's label
    pub label: String,
    /// SVG color
    pub color: String,
    /// Marker shape
    pub marker: Marker,
    /// X values in draw order
    pub x: Vec<f64>,
    /// Y values in draw order
    pub y: Vec<f64>,
}

impl Trace {
    /// Number of plotted points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when the run contributed no samples
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` pairs in draw order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A titled plot with its own axes and traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel title
    pub title: String,
    /// Horizontal axis
    pub x_axis: Axis,
    /// Vertical axis
    pub y_axis: Axis,
    /// Traces in draw order
    pub traces: Vec<Trace>,
    /// Whether a background grid is drawn
    pub grid: bool,
    /// Whether a legend is drawn
    pub legend: bool,
}

/// A complete comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Panel arrangement
    pub layout: Layout,
    /// Panels, top first
    pub panels: Vec<Panel>,
}

/// Output formats a chart can be saved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// Standalone SVG image
    Svg,
    /// Panel and trace structure as JSON
    Json,
}

impl ChartFormat {
    /// `.json` selects JSON; every other extension selects SVG
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ChartFormat::Json,
            _ => ChartFormat::Svg,
        }
    }
}

impl Chart {
    /// Write the chart as an SVG document
    pub fn to_svg<W: Write>(&self, writer: W) -> Result<(), RenderError> {
        svg::write_chart(self, writer)?;
        Ok(())
    }

    /// Render the chart to an SVG string
    pub fn to_svg_string(&self) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.to_svg(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Serialize the chart structure as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to `path`, choosing the format from its extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<ChartFormat, RenderError> {
        let path = path.as_ref();
        let output = |source| RenderError::Output {
            path: path.to_path_buf(),
            source,
        };

        let format = ChartFormat::from_path(path);
        let mut writer = BufWriter::new(File::create(path).map_err(output)?);
        match format {
            ChartFormat::Svg => self.to_svg(&mut writer)?,
            ChartFormat::Json => writer
                .write_all(self.to_json()?.as_bytes())
                .map_err(output)?,
        }
        writer.flush().map_err(output)?;

        debug!("Saved {:?} chart to {}", format, path.display());
        Ok(format)
    }
}

/// Builder that pairs two runs and renders their comparison
#[derive(Debug, Clone, Default)]
pub struct ComparisonRenderer {
    config: ChartConfig,
    run_a: Option<RunSeries>,
    run_b: Option<RunSeries>,
}

impl ComparisonRenderer {
    /// Create a renderer with the given canvas settings
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            run_a: None,
            run_b: None,
        }
    }

    /// Set the first run
    pub fn run_a(mut self, series: RunSeries) -> Self {
        self.run_a = Some(series);
        self
    }

    /// Set the second run
    pub fn run_b(mut self, series: RunSeries) -> Self {
        self.run_b = Some(series);
        self
    }

    /// Build the chart; fails if either run is missing or the canvas is too small
    pub fn render(self) -> Result<Chart, RenderError> {
        let run_a = self.run_a.ok_or(RenderError::MissingSeries(RunSlot::A))?;
        let run_b = self.run_b.ok_or(RenderError::MissingSeries(RunSlot::B))?;

        let config = self.config;
        if config.width < MIN_DIMENSION || config.height < MIN_DIMENSION {
            return Err(RenderError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        Ok(build_chart(&config, &run_a, &run_b))
    }
}

/// Render two runs with the default canvas settings
pub fn render(series_a: RunSeries, series_b: RunSeries) -> Chart {
    build_chart(&ChartConfig::default(), &series_a, &series_b)
}

#[derive(Clone, Copy)]
enum Metric {
    Tps,
    Latency,
}

fn build_chart(config: &ChartConfig, run_a: &RunSeries, run_b: &RunSeries) -> Chart {
    let time_range = match (run_a.table.time_range(), run_b.table.time_range()) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, b) => a.or(b),
    };
    let x_range = AxisRange::from_time_range(time_range);

    let comparison = format!("{} vs {}", run_a.label, run_b.label);
    let panels = vec![
        build_panel(
            format!("{}: {}", config.tps_title, comparison),
            TPS_AXIS_LABEL,
            Metric::Tps,
            x_range,
            [run_a, run_b],
        ),
        build_panel(
            format!("{}: {}", config.latency_title, comparison),
            LATENCY_AXIS_LABEL,
            Metric::Latency,
            x_range,
            [run_a, run_b],
        ),
    ];

    debug!(
        "Rendered comparison of '{}' ({} samples) and '{}' ({} samples)",
        run_a.label,
        run_a.table.len(),
        run_b.label,
        run_b.table.len()
    );

    Chart {
        width: config.width,
        height: config.height,
        layout: Layout::Vertical,
        panels,
    }
}

fn build_panel(
    title: String,
    y_label: &str,
    metric: Metric,
    x_range: AxisRange,
    runs: [&RunSeries; 2],
) -> Panel {
    let traces: Vec<Trace> = runs
        .iter()
        .map(|run| {
            let (y, color) = match metric {
                Metric::Tps => (run.table.tps(), &run.style.tps_color),
                Metric::Latency => (run.table.latencies(), &run.style.latency_color),
            };
            Trace {
                label: run.label.clone(),
                color: color.clone(),
                marker: run.style.marker,
                x: run.table.times(),
                y,
            }
        })
        .collect();

    let y_range = AxisRange::covering(traces.iter().flat_map(|t| t.y.iter().copied()));

    Panel {
        title,
        x_axis: Axis {
            label: TIME_AXIS_LABEL.to_string(),
            range: x_range,
        },
        y_axis: Axis {
            label: y_label.to_string(),
            range: y_range,
        },
        traces,
        grid: true,
        legend: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    fn table(rows: &[(f64, f64, f64, f64)]) -> SampleTable {
        SampleTable::from_samples(
            rows.iter()
                .map(|&(t, tps, lat, sd)| Sample::new(t, tps, lat, sd))
                .collect(),
        )
    }

    fn runs() -> (RunSeries, RunSeries) {
        let a = RunSeries::new(
            "many filters",
            table(&[(1.0, 100.0, 5.0, 0.1), (2.0, 110.0, 4.0, 0.2)]),
            SeriesStyle::run_a(),
        );
        let b = RunSeries::new(
            "one filter",
            table(&[(0.5, 200.0, 2.0, 0.3), (3.0, 210.0, 2.5, 0.4)]),
            SeriesStyle::run_b(),
        );
        (a, b)
    }

    #[test]
    fn test_two_panels_two_traces_in_order() {
        let (a, b) = runs();
        let chart = render(a, b);

        assert_eq!(chart.layout, Layout::Vertical);
        assert_eq!(chart.panels.len(), 2);
        for panel in &chart.panels {
            assert_eq!(panel.traces.len(), 2);
            assert_eq!(panel.traces[0].label, "many filters");
            assert_eq!(panel.traces[1].label, "one filter");
            assert!(panel.grid);
            assert!(panel.legend);
            assert_eq!(panel.x_axis.label, TIME_AXIS_LABEL);
        }

        assert_eq!(chart.panels[0].y_axis.label, TPS_AXIS_LABEL);
        assert_eq!(chart.panels[1].y_axis.label, LATENCY_AXIS_LABEL);
        assert_eq!(
            chart.panels[0].title,
            "TPS Comparison: many filters vs one filter"
        );
        assert_eq!(
            chart.panels[1].title,
            "Latency Comparison: many filters vs one filter"
        );
    }

    #[test]
    fn test_latency_panel_plots_mean_not_stddev() {
        let (a, b) = runs();
        let chart = render(a, b);
        let latency = &chart.panels[1];
        assert_eq!(latency.traces[0].y, vec![5.0, 4.0]);
        assert_eq!(latency.traces[1].y, vec![2.0, 2.5]);
        assert_eq!(chart.panels[0].traces[0].y, vec![100.0, 110.0]);
    }

    #[test]
    fn test_shared_time_domain() {
        let (a, b) = runs();
        let chart = render(a, b);
        for panel in &chart.panels {
            assert_eq!(panel.x_axis.range, AxisRange { min: 0.5, max: 3.0 });
        }
    }

    #[test]
    fn test_styles_follow_panel() {
        let (a, b) = runs();
        let chart = render(a, b);
        assert_eq!(chart.panels[0].traces[0].color, "blue");
        assert_eq!(chart.panels[0].traces[1].color, "green");
        assert_eq!(chart.panels[1].traces[0].color, "red");
        assert_eq!(chart.panels[1].traces[1].color, "orange");
        assert_eq!(chart.panels[1].traces[1].marker, Marker::Cross);
    }

    #[test]
    fn test_empty_series_keeps_legend_entry() {
        let (a, _) = runs();
        let empty = RunSeries::new("empty", SampleTable::new(), SeriesStyle::run_b());
        let chart = ComparisonRenderer::default()
            .run_a(a)
            .run_b(empty)
            .render()
            .unwrap();

        for panel in &chart.panels {
            assert_eq!(panel.traces.len(), 2);
            assert_eq!(panel.traces[1].label, "empty");
            assert!(panel.traces[1].is_empty());
            assert_eq!(panel.traces[0].len(), 2);
            assert_eq!(panel.x_axis.range, AxisRange { min: 1.0, max: 2.0 });
        }
    }

    #[test]
    fn test_both_empty_uses_unit_domain() {
        let a = RunSeries::new("a", SampleTable::new(), SeriesStyle::run_a());
        let b = RunSeries::new("b", SampleTable::new(), SeriesStyle::run_b());
        let chart = render(a, b);
        assert_eq!(chart.panels[0].x_axis.range, AxisRange { min: 0.0, max: 1.0 });
        assert_eq!(chart.panels[0].y_axis.range, AxisRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_missing_series() {
        let (a, b) = runs();

        let err = ComparisonRenderer::default().run_a(a).render().unwrap_err();
        assert!(matches!(err, RenderError::MissingSeries(RunSlot::B)));
        assert!(err.to_string().contains("run B"));

        let err = ComparisonRenderer::default().run_b(b).render().unwrap_err();
        assert!(matches!(err, RenderError::MissingSeries(RunSlot::A)));
    }

    #[test]
    fn test_invalid_size() {
        let (a, b) = runs();
        let config = ChartConfig {
            width: 50,
            ..Default::default()
        };
        let err = ComparisonRenderer::new(config)
            .run_a(a)
            .run_b(b)
            .render()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize { width: 50, .. }));
    }

    #[test]
    fn test_deterministic() {
        let (a, b) = runs();
        let first = render(a.clone(), b.clone());
        let second = render(a, b);
        assert_eq!(first, second);
        assert_eq!(
            first.to_svg_string().unwrap(),
            second.to_svg_string().unwrap()
        );
    }

    #[test]
    fn test_axis_range_covering() {
        assert_eq!(
            AxisRange::covering([3.0, 1.0, 2.0]),
            AxisRange { min: 1.0, max: 3.0 }
        );
        assert_eq!(AxisRange::covering([4.0]), AxisRange { min: 3.0, max: 5.0 });
        assert_eq!(
            AxisRange::covering(std::iter::empty()),
            AxisRange { min: 0.0, max: 1.0 }
        );
    }

    #[test]
    fn test_json_structure() {
        let (a, b) = runs();
        let json = render(a, b).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layout"], "vertical");
        assert_eq!(value["panels"][1]["traces"][0]["marker"], "circle");
        assert_eq!(value["panels"][1]["y_axis"]["label"], "Latency (ms)");
    }

    #[test]
    fn test_marker_from_str() {
        assert_eq!(Marker::from_str("x").unwrap(), Marker::Cross);
        assert_eq!(Marker::from_str("Circle").unwrap(), Marker::Circle);
        assert!(Marker::from_str("star").is_err());
    }

    #[test]
    fn test_chart_format_from_path() {
        assert_eq!(ChartFormat::from_path(Path::new("c.json")), ChartFormat::Json);
        assert_eq!(ChartFormat::from_path(Path::new("c.svg")), ChartFormat::Svg);
        assert_eq!(ChartFormat::from_path(Path::new("chart")), ChartFormat::Svg);
    }

    #[test]
    fn test_stddev_does_not_affect_chart() {
        let a1 = RunSeries::new(
            "a",
            table(&[(1.0, 1.0, 1.0, 0.1)]),
            SeriesStyle::run_a(),
        );
        let a2 = RunSeries::new(
            "a",
            table(&[(1.0, 1.0, 1.0, 9.9)]),
            SeriesStyle::run_a(),
        );
        let b = RunSeries::new("b", SampleTable::new(), SeriesStyle::run_b());
        assert_eq!(render(a1, b.clone()), render(a2, b));
    }
}
