//!
//! Common types and utilities shared by the stock advisor shell and its tests.
//!
//! This crate aggregates:
//! - `error` — unified error type `AdvisorError` used across the workspace.
//! - `result` — handy `Result<T, AdvisorError>` alias.
//! - `tickers` — the closed stock and index ticker sets offered to the user.
//! - `dates` — best-effort calendar date coercion.
//! - `raw` — the CSV file as read, before any reconciliation.
//! - `table` — the canonical `PriceTable`.
//! - `normalizer` — turns a raw per-ticker file into a `PriceTable`.
#![warn(missing_docs)]
pub mod dates;
pub mod error;
pub mod normalizer;
pub mod raw;
pub mod result;
pub mod table;
pub mod tickers;

pub use error::AdvisorError;
pub use normalizer::{Normalized, Normalizer};
pub use result::Result;
pub use table::{PriceRow, PriceTable};
