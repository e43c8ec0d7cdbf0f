//! Stock Advisor — a terminal dashboard that loads per-ticker CSV files from a local
//! folder, normalizes their column layout and shows the latest rows, a close-price
//! chart and the latest closing price for one stock and one market index.
//!
//! Usage example (CLI):
//! ```bash
//! stock_advisor --data-dir ./data --stock msft --index gspc
//! stock_advisor --data-dir ./data --interactive
//! ```
//!
//! Each ticker is read from `<data-dir>/<TICKER>.csv`. See `advisor_common::normalizer`
//! for the accepted column layouts.
#![warn(missing_docs)]
mod args;
mod chart;
mod model;
mod session;
mod view;

use crate::args::Args;
use crate::chart::ChartSize;
use crate::model::render::{Section, handle_request};
use crate::model::selection::Selection;
use crate::session::Session;
use advisor_common::{AdvisorError, Normalizer, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() -> Result<(), AdvisorError> {
    init_logger();
    let args = Args::parse();

    let data_dir = normalize_path(&args.data_dir);
    if !is_dir_exist(&data_dir) {
        warn!(
            "Data folder {} does not exist; every ticker will report no data",
            data_dir.display()
        );
    }
    let normalizer = Normalizer::new(data_dir);
    let selection = Selection::new(args.stock, args.index);
    let chart = ChartSize {
        width: args.chart_width,
        height: args.chart_height,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.interactive {
        let stdin = io::stdin();
        let mut notes = io::stderr().lock();
        let mut session = Session::new(&normalizer, selection, args.format, chart);
        session.run(stdin.lock(), &mut out, &mut notes)?;
        let last = session.selection();
        info!("Last selection: {} / {}", last.stock, last.index);
    } else {
        info!(
            "Rendering {} and {} from {}",
            selection.stock,
            selection.index,
            normalizer.base_dir().display()
        );
        let model = handle_request(&normalizer, &selection, true);
        if !model.sections.iter().any(Section::has_data) {
            warn!("Neither {} nor {} had usable data", selection.stock, selection.index);
        }
        view::render(&model, args.format, chart, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a directory.
fn is_dir_exist(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
