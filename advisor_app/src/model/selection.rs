//! The user's current ticker choices.
use advisor_common::tickers::{IndexTicker, StockTicker};
use serde::Serialize;

/// One stock and one index, as picked in the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Selected stock.
    pub stock: StockTicker,
    /// Selected market index.
    pub index: IndexTicker,
}

impl Selection {
    /// Builds a selection from explicit choices.
    pub fn new(stock: StockTicker, index: IndexTicker) -> Self {
        Self { stock, index }
    }
}
