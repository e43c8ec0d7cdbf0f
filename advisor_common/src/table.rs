//! Canonical price table produced by the normalizer.
//!
//! A `PriceTable` is a date-indexed sequence of `PriceRow`s carrying exactly the
//! `Open, High, Low, Close, Volume` columns. Rows keep the order they had in the
//! source file and duplicate dates are allowed. An empty table is a regular
//! value meaning "no usable data for this ticker".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical column names, in projection order.
pub const COLUMNS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

/// One dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Index value of the row.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price (or adjusted close when that was the only close column).
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl PriceRow {
    /// Value of the canonical column `name`, if it is one.
    pub fn value(&self, name: &str) -> Option<f64> {
        match name {
            "Open" => Some(self.open),
            "High" => Some(self.high),
            "Low" => Some(self.low),
            "Close" => Some(self.close),
            "Volume" => Some(self.volume),
            _ => None,
        }
    }
}

/// Date-indexed table with the five canonical columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Creates a table from rows already in display order.
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    /// The "no usable data" table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in index order.
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Column names of the table.
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Whether a column called `name` is part of the table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns().iter().any(|c| *c == name)
    }

    /// Whether column `name` exists and holds at least one finite value.
    ///
    /// A column whose every cell was blank or non-numeric is as good as absent.
    pub fn has_values(&self, name: &str) -> bool {
        self.has_column(name)
            && self
                .rows
                .iter()
                .any(|r| r.value(name).is_some_and(f64::is_finite))
    }

    /// The last `n` rows (fewer if the table is shorter), most recent last.
    pub fn tail(&self, n: usize) -> &[PriceRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// `(date, close)` pairs in index order, used for charting.
    pub fn close_series(&self) -> Vec<(NaiveDate, f64)> {
        self.rows.iter().map(|r| (r.date, r.close)).collect()
    }

    /// Closing value of the most recent row.
    pub fn latest_close(&self) -> Option<f64> {
        self.rows.last().map(|r| r.close)
    }

    /// Index value of the first row.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    /// Index value of the last row.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, close: f64) -> PriceRow {
        PriceRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn tail_returns_most_recent_rows_last() {
        let table = PriceTable::new((1..=8).map(|d| row(d, d as f64)).collect());
        let tail = table.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].close, 4.0);
        assert_eq!(tail[4].close, 8.0);
        assert_eq!(table.latest_close(), Some(8.0));
    }

    #[test]
    fn tail_of_short_table_is_whole_table() {
        let table = PriceTable::new(vec![row(1, 1.0), row(2, 2.0)]);
        assert_eq!(table.tail(5).len(), 2);
    }

    #[test]
    fn empty_table_has_no_latest_close() {
        let table = PriceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.latest_close(), None);
        assert!(table.tail(5).is_empty());
        assert!(table.has_column("Close"));
        assert!(!table.has_column("Adj Close"));
    }

    #[test]
    fn blank_column_has_no_values() {
        let mut blank = row(1, f64::NAN);
        blank.volume = f64::NAN;
        let table = PriceTable::new(vec![blank, row(2, f64::NAN)]);
        assert!(table.has_column("Close"));
        assert!(!table.has_values("Close"));
        assert!(table.has_values("Volume"));
        assert!(!table.has_values("Adj Close"));
        assert_eq!(row(3, 4.0).value("Low"), Some(4.0));
        assert_eq!(row(3, 4.0).value("Date"), None);
    }

    #[test]
    fn close_series_follows_index_order() {
        let table = PriceTable::new(vec![row(3, 3.5), row(1, 1.5)]);
        let series = table.close_series();
        assert_eq!(series[0].1, 3.5);
        assert_eq!(series[1].1, 1.5);
        assert_eq!(table.first_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(table.last_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }
}
