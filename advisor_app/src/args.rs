//! Command-line arguments for the stock advisor.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use advisor_common::tickers::{IndexTicker, StockTicker};
use clap::{Parser, ValueEnum};
use strum_macros::Display;

/// How a render model is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Tables, an ASCII chart and warnings for humans.
    #[default]
    Text,
    /// The render model as pretty-printed JSON.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Folder holding one `<TICKER>.csv` file per ticker.
    #[clap(long, default_value = "data")]
    pub data_dir: String,

    /// Stock to show.
    #[clap(long, value_enum, ignore_case = true, default_value_t)]
    pub stock: StockTicker,

    /// Market index to show next to the stock.
    #[clap(long, value_enum, ignore_case = true, default_value_t)]
    pub index: IndexTicker,

    /// Output format.
    #[clap(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Read `stock`, `index` and `submit` commands from stdin instead of rendering once.
    #[clap(long)]
    pub interactive: bool,

    /// Rows of the close-price chart, date axis included.
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(4..))]
    pub chart_height: u16,

    /// Columns of the close-price chart, value labels included.
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(4..))]
    pub chart_width: u16,
}
