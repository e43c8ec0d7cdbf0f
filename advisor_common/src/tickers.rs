//! Ticker symbols offered by the dashboard.
//!
//! Two closed sets are known at startup: the stocks a user can pick and the
//! market indices to compare them against. Both parse case-insensitively and
//! display as the upper-case symbol, which is also the CSV file stem.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::AdvisorError;

/// Parsing helpers shared by both ticker sets.
pub trait TickerSet: FromStr + IntoEnumIterator + ToString {
    /// Parses a user-supplied symbol, ignoring surrounding whitespace and case.
    fn parse_symbol(raw: &str) -> Result<Self, AdvisorError> {
        let trimmed = raw.trim();
        trimmed
            .parse::<Self>()
            .map_err(|_| AdvisorError::InvalidTicker(trimmed.to_string()))
    }

    /// Comma separated list of all symbols, in offering order.
    fn catalog() -> String {
        Self::iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Stocks that can be selected.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum StockTicker {
    #[default]
    AAPL,
    GOOGL,
    MSFT,
    AMZN,
    TSLA,
    NFLX,
}

/// Market indices that can be selected.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum IndexTicker {
    #[default]
    IXIC,
    GSPC,
}

impl TickerSet for StockTicker {}
impl TickerSet for IndexTicker {}
