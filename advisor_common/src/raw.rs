//! The CSV source as read from disk, before reconciliation.
//!
//! Nothing about the layout is trusted here: headers are kept verbatim (until
//! `trim_headers` is called), duplicated names are allowed, and every cell
//! stays a string. Short records are padded so each row lines up with the
//! header; surplus cells are dropped.

use std::io::Read;

use csv::ReaderBuilder;

use crate::result::Result;

/// Untyped table parsed from a CSV file with a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// One entry per data row, each exactly `headers.len()` cells long.
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    /// Reads a CSV document whose first row is the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        let width = headers.len();

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut cells: Vec<String> = record.iter().take(width).map(String::from).collect();
            cells.resize(width, String::new());
            records.push(cells);
        }

        Ok(Self { headers, records })
    }

    /// Strips surrounding whitespace (and a stray byte order mark) from every header.
    pub fn trim_headers(&mut self) {
        for header in &mut self.headers {
            *header = header.trim().trim_start_matches('\u{feff}').trim().to_string();
        }
    }

    /// Index of the first column called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether at least one column is called `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Renames every column called `from` to `to`; returns how many were renamed.
    pub fn rename(&mut self, from: &str, to: &str) -> usize {
        let mut renamed = 0;
        for header in self.headers.iter_mut().filter(|h| h.as_str() == from) {
            *header = to.to_string();
            renamed += 1;
        }
        renamed
    }

    /// Number of columns called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.headers.iter().filter(|h| h.as_str() == name).count()
    }

    /// Drops every column whose name already appeared further left.
    pub fn drop_duplicate_columns(&mut self) {
        let mut keep = Vec::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            keep.push(self.headers[..idx].iter().all(|h| h != header));
        }
        if keep.iter().all(|k| *k) {
            return;
        }

        self.headers = retain_by_mask(std::mem::take(&mut self.headers), &keep);
        for record in &mut self.records {
            *record = retain_by_mask(std::mem::take(record), &keep);
        }
    }

    /// The first `n` records, for diagnostics.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.records[..n.min(self.records.len())]
    }
}

fn retain_by_mask(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(value, keep)| keep.then_some(value))
        .collect()
}
