//! TOML configuration file support.
//!
//! Labels, colors and canvas settings can be set in a config file instead of
//! relying on the defaults:
//!
//! ```toml
//! # tpsplot.toml
//! [chart]
//! width = 1200
//! height = 800
//!
//! [run_a]
//! label = "many non-height filter conditions"
//! tps_color = "blue"
//! latency_color = "red"
//! marker = "circle"
//!
//! [run_b]
//! label = "only one non-height filter condition"
//! marker = "cross"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use tpsplot::chart::{ChartConfig, Marker, RunSlot, SeriesStyle};

/// Root configuration structure for tpsplot.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Canvas and title settings.
    #[serde(default)]
    pub chart: ChartSection,

    /// Settings for the first run.
    #[serde(default)]
    pub run_a: RunSection,

    /// Settings for the second run.
    #[serde(default)]
    pub run_b: RunSection,
}

/// Canvas and title overrides.
#[derive(Debug, Default, Deserialize)]
pub struct ChartSection {
    /// Canvas width in pixels.
    pub width: Option<u32>,

    /// Canvas height in pixels.
    pub height: Option<u32>,

    /// Title prefix of the TPS panel.
    pub tps_title: Option<String>,

    /// Title prefix of the latency panel.
    pub latency_title: Option<String>,
}

/// Per-run overrides.
#[derive(Debug, Default, Deserialize)]
pub struct RunSection {
    /// Legend label (defaults to the input file stem).
    pub label: Option<String>,

    /// Trace color in the TPS panel.
    pub tps_color: Option<String>,

    /// Trace color in the latency panel.
    pub latency_color: Option<String>,

    /// Marker shape in both panels.
    pub marker: Option<Marker>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the given file, or fall back to defaults when no file was passed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Canvas settings with overrides applied.
    pub fn chart_config(&self) -> ChartConfig {
        let defaults = ChartConfig::default();
        ChartConfig {
            width: self.chart.width.unwrap_or(defaults.width),
            height: self.chart.height.unwrap_or(defaults.height),
            tps_title: self
                .chart
                .tps_title
                .clone()
                .unwrap_or(defaults.tps_title),
            latency_title: self
                .chart
                .latency_title
                .clone()
                .unwrap_or(defaults.latency_title),
        }
    }

    /// Settings for one run.
    pub fn run(&self, slot: RunSlot) -> &RunSection {
        match slot {
            RunSlot::A => &self.run_a,
            RunSlot::B => &self.run_b,
        }
    }

    /// Style for one run with overrides applied.
    pub fn style(&self, slot: RunSlot) -> SeriesStyle {
        let defaults = match slot {
            RunSlot::A => SeriesStyle::run_a(),
            RunSlot::B => SeriesStyle::run_b(),
        };
        let run = self.run(slot);
        SeriesStyle {
            tps_color: run.tps_color.clone().unwrap_or(defaults.tps_color),
            latency_color: run.latency_color.clone().unwrap_or(defaults.latency_color),
            marker: run.marker.unwrap_or(defaults.marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [chart]
            width = 1200
            height = 800
            tps_title = "Throughput"

            [run_a]
            label = "many filters"
            marker = "square"

            [run_b]
            label = "one filter"
            tps_color = "purple"
        "#;

        let config = Config::from_str(toml).unwrap();
        let chart = config.chart_config();
        assert_eq!(chart.width, 1200);
        assert_eq!(chart.height, 800);
        assert_eq!(chart.tps_title, "Throughput");
        assert_eq!(chart.latency_title, "Latency Comparison");

        assert_eq!(config.run(RunSlot::A).label.as_deref(), Some("many filters"));
        assert_eq!(config.style(RunSlot::A).marker, Marker::Square);
        assert_eq!(config.style(RunSlot::A).tps_color, "blue");

        let style_b = config.style(RunSlot::B);
        assert_eq!(style_b.tps_color, "purple");
        assert_eq!(style_b.latency_color, "orange");
        assert_eq!(style_b.marker, Marker::Cross);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.chart_config(), ChartConfig::default());
        assert_eq!(config.style(RunSlot::A), SeriesStyle::run_a());
        assert_eq!(config.style(RunSlot::B), SeriesStyle::run_b());
        assert!(config.run(RunSlot::B).label.is_none());
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let toml = r#"
            [run_a]
            marker = "star"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
