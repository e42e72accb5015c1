//! # tpsplot
//!
//! A command-line tool for extracting benchmark progress reports and comparing
//! two runs.
//!
//! ## Usage
//!
//! ```bash
//! # Extract each run's progress log into a table
//! tpsplot extract progress_log1.txt
//! tpsplot extract progress_log2.txt
//!
//! # Render the comparison chart
//! tpsplot render progress_log1.csv progress_log2.csv comparison.svg
//!
//! # Or do both in one step
//! tpsplot compare progress_log1.txt progress_log2.txt comparison.svg
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
