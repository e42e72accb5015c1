use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compare;
mod config;
mod extract;
mod info;
mod render;

/// tpsplot - Benchmark progress log extraction and two-run comparison
#[derive(Parser)]
#[command(name = "tpsplot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract progress reports from a log into a CSV table
    Extract {
        /// Input progress log (plain text or .gz)
        #[arg(value_name = "LOG")]
        input: PathBuf,

        /// Output table path (defaults to the log name with a .csv extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render two tables as a TPS/latency comparison chart
    Render {
        /// Table of the first run
        #[arg(value_name = "TABLE_A")]
        table_a: PathBuf,

        /// Table of the second run
        #[arg(value_name = "TABLE_B")]
        table_b: PathBuf,

        /// Output chart path (.svg or .json)
        #[arg(value_name = "OUTPUT", default_value = "comparison.svg")]
        output: PathBuf,

        /// Load labels, colors and canvas settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Extract two logs and render their comparison in one step
    Compare {
        /// Progress log of the first run
        #[arg(value_name = "LOG_A")]
        log_a: PathBuf,

        /// Progress log of the second run
        #[arg(value_name = "LOG_B")]
        log_b: PathBuf,

        /// Output chart path (.svg or .json)
        #[arg(value_name = "OUTPUT", default_value = "comparison.svg")]
        output: PathBuf,

        /// Load labels, colors and canvas settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a persisted table
    Info {
        /// Table path
        #[arg(value_name = "TABLE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract { input, output } => extract::run(input, output),
        Commands::Render {
            table_a,
            table_b,
            output,
            config,
        } => render::run(table_a, table_b, output, config),
        Commands::Compare {
            log_a,
            log_b,
            output,
            config,
        } => compare::run(log_a, log_b, output, config),
        Commands::Info { file } => info::run(file),
    }
}
