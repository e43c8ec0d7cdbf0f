//! Per-ticker CSV normalization.
//!
//! Source files come from different exporters and disagree on header spelling,
//! date layout and which close column they carry. `Normalizer` locates the file
//! for a ticker and reconciles it into the canonical [`PriceTable`]:
//!
//! 1. headers are trimmed;
//! 2. the date column is `Date`, or else `date` / `Datetime` renamed to `Date`;
//! 3. dates are coerced with [`parse_date`] and unparseable rows are dropped;
//! 4. `Adj Close` becomes `Close` and duplicated names keep their first column;
//! 5. `Open, High, Low, Close, Volume` are projected in that order.
//!
//! [`Normalizer::load`] reports failures as a tagged `Result`;
//! [`Normalizer::normalize`] never fails and hands back an empty table
//! together with the cause instead.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::dates::parse_date;
use crate::error::AdvisorError;
use crate::raw::RawTable;
use crate::result::Result;
use crate::table::{COLUMNS, PriceRow, PriceTable};

/// Canonical name of the index column.
pub const DATE_COLUMN: &str = "Date";
/// Alternative spellings of the date column, in lookup order.
pub const DATE_ALIASES: [&str; 2] = ["date", "Datetime"];
/// Column renamed to `Close` during reconciliation.
pub const ADJ_CLOSE_COLUMN: &str = "Adj Close";
/// Extension of source files.
pub const SOURCE_EXTENSION: &str = "csv";
/// Number of raw rows echoed to the debug log.
const PREVIEW_ROWS: usize = 5;

/// Outcome of a non-failing normalization.
///
/// `table` is empty whenever `error` is set.
#[derive(Debug)]
pub struct Normalized {
    /// Ticker that was requested.
    pub ticker: String,
    /// Canonical table, possibly empty.
    pub table: PriceTable,
    /// Why the table is empty, if it is because of a failure.
    pub error: Option<AdvisorError>,
}

impl Normalized {
    /// `true` when the ticker had no backing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self.error, Some(AdvisorError::SourceNotFound { .. }))
    }

    /// `true` when the file existed but lacked a required column.
    pub fn is_schema_incomplete(&self) -> bool {
        matches!(self.error, Some(AdvisorError::SchemaIncomplete { .. }))
    }
}

/// Loads and reconciles per-ticker CSV files from a base folder.
#[derive(Debug, Clone)]
pub struct Normalizer {
    base_dir: PathBuf,
}

impl Normalizer {
    /// Creates a normalizer reading `<base_dir>/<ticker>.csv`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Folder the sources are read from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Location of the source file for `ticker`.
    pub fn source_path(&self, ticker: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", ticker, SOURCE_EXTENSION))
    }

    /// Reads and reconciles the source for `ticker`.
    ///
    /// Returns `SourceNotFound` when there is no file and `SchemaIncomplete`
    /// when the date column or one of the canonical columns cannot be found.
    pub fn load(&self, ticker: &str) -> Result<PriceTable> {
        let path = self.source_path(ticker);
        let not_found = || AdvisorError::SourceNotFound {
            ticker: ticker.to_string(),
            path: path.clone(),
        };

        if !path.is_file() {
            return Err(not_found());
        }
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(),
            _ => AdvisorError::Io(e),
        })?;

        debug!("Reading {} from {}", ticker, path.display());
        let raw = RawTable::from_reader(BufReader::new(file))?;
        reconcile(ticker, raw)
    }

    /// Like [`Self::load`], but degrades every failure to an empty table.
    pub fn normalize(&self, ticker: &str) -> Normalized {
        match self.load(ticker) {
            Ok(table) => {
                info!("Loaded {} rows for {}", table.len(), ticker);
                Normalized {
                    ticker: ticker.to_string(),
                    table,
                    error: None,
                }
            }
            Err(e) => {
                match &e {
                    AdvisorError::SourceNotFound { .. } => error!("{}", e),
                    _ => warn!("Discarding data for {}: {}", ticker, e),
                }
                Normalized {
                    ticker: ticker.to_string(),
                    table: PriceTable::empty(),
                    error: Some(e),
                }
            }
        }
    }
}

/// Turns a raw source into the canonical table.
pub fn reconcile(ticker: &str, mut raw: RawTable) -> Result<PriceTable> {
    raw.trim_headers();
    info!("Columns in the data for {}: {:?}", ticker, raw.headers);
    for (n, record) in raw.head(PREVIEW_ROWS).iter().enumerate() {
        debug!("{} row {}: {:?}", ticker, n, record);
    }

    let date_idx = resolve_date_column(ticker, &mut raw)?;
    let dates: Vec<_> = raw
        .records
        .iter()
        .map(|record| parse_date(&record[date_idx]))
        .collect();
    let dropped = dates.iter().filter(|d| d.is_none()).count();
    if dropped > 0 {
        debug!("{}: dropped {} row(s) with an unparseable date", ticker, dropped);
    }

    if raw.rename(ADJ_CLOSE_COLUMN, "Close") > 0 {
        debug!("{}: renamed '{}' to 'Close'", ticker, ADJ_CLOSE_COLUMN);
    }
    if raw.count("Close") > 1 {
        debug!("{}: keeping the first of {} 'Close' columns", ticker, raw.count("Close"));
    }
    raw.drop_duplicate_columns();

    let positions = project(ticker, &raw)?;
    let rows = raw
        .records
        .iter()
        .zip(dates)
        .filter_map(|(record, date)| {
            let date = date?;
            let value = |col: usize| parse_value(&record[positions[col]]);
            Some(PriceRow {
                date,
                open: value(0),
                high: value(1),
                low: value(2),
                close: value(3),
                volume: value(4),
            })
        })
        .collect();

    Ok(PriceTable::new(rows))
}

/// Makes sure a `Date` column exists and returns its index.
fn resolve_date_column(ticker: &str, raw: &mut RawTable) -> Result<usize> {
    if let Some(idx) = raw.position(DATE_COLUMN) {
        return Ok(idx);
    }

    warn!("No '{}' column for {}, columns are {:?}", DATE_COLUMN, ticker, raw.headers);
    for alias in DATE_ALIASES {
        if raw.rename(alias, DATE_COLUMN) > 0 {
            info!("{}: using '{}' as the date column", ticker, alias);
            break;
        }
    }

    raw.position(DATE_COLUMN)
        .ok_or_else(|| AdvisorError::SchemaIncomplete {
            ticker: ticker.to_string(),
            missing: vec![DATE_COLUMN.to_string()],
        })
}

/// Positions of the canonical columns, in `COLUMNS` order.
fn project(ticker: &str, raw: &RawTable) -> Result<[usize; 5]> {
    let mut positions = [0usize; 5];
    let mut missing = Vec::new();
    for (slot, name) in positions.iter_mut().zip(COLUMNS) {
        match raw.position(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(AdvisorError::SchemaIncomplete {
            ticker: ticker.to_string(),
            missing,
        })
    }
}

/// Numeric cell coercion; blanks and garbage become `NaN`.
fn parse_value(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}
