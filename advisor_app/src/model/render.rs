//! The pure request handler behind the dashboard.
//!
//! `handle_request` takes the current selection and whether "Submit" was
//! pressed and returns a `RenderModel` describing everything to display. It
//! performs exactly two normalizations per submit (stock, then index) and keeps
//! no state between calls, so repeating a submit recomputes the same model from
//! the files on disk.
use advisor_common::{Normalized, Normalizer, PriceRow};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::model::selection::Selection;

/// Heading of the dashboard.
pub const TITLE: &str = "AI Stock Advisor";
/// Number of most recent rows shown per ticker.
pub const TAIL_ROWS: usize = 5;

/// Why a section has no data, kept for machine consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cause {
    /// Short error kind, e.g. `source_not_found`.
    pub kind: &'static str,
    /// Full error message.
    pub detail: String,
}

/// What a section shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    /// Recent rows plus the close series to chart.
    Data {
        /// Most recent rows, oldest first.
        tail: Vec<PriceRow>,
        /// `(date, close)` points for the line chart.
        chart: Vec<(NaiveDate, f64)>,
    },
    /// A notice shown instead of data.
    Warning {
        /// Text of the notice.
        message: String,
    },
}

/// One ticker's block on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Section heading, e.g. `Stock Data for AAPL`.
    pub heading: String,
    /// Ticker symbol the section is about.
    pub ticker: String,
    /// Displayed content.
    pub content: Content,
    /// Load failure behind a warning, if any.
    pub cause: Option<Cause>,
}

impl Section {
    /// `true` when the section carries a table and chart.
    pub fn has_data(&self) -> bool {
        matches!(self.content, Content::Data { .. })
    }
}

/// Everything the shell displays for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    /// Page title.
    pub title: &'static str,
    /// Selection the model was computed for.
    pub selection: Selection,
    /// Whether "Submit" was pressed.
    pub submitted: bool,
    /// Stock section then index section; empty when not submitted.
    pub sections: Vec<Section>,
    /// Latest-close lines for the tickers that had data.
    pub insights: Vec<String>,
}

/// Builds the render model for `selection`.
///
/// Nothing is loaded unless `triggered` is set.
pub fn handle_request(
    normalizer: &Normalizer,
    selection: &Selection,
    triggered: bool,
) -> RenderModel {
    let mut model = RenderModel {
        title: TITLE,
        selection: *selection,
        submitted: triggered,
        sections: Vec::new(),
        insights: Vec::new(),
    };
    if !triggered {
        return model;
    }

    debug!("Submit: stock={} index={}", selection.stock, selection.index);
    let stock = normalizer.normalize(&selection.stock.to_string());
    let index = normalizer.normalize(&selection.index.to_string());

    model.sections.push(stock_section(&stock));
    model.sections.push(index_section(&index));
    model.insights = [&stock, &index]
        .into_iter()
        .filter_map(insight)
        .collect();
    model
}

fn stock_section(result: &Normalized) -> Section {
    let heading = format!("Stock Data for {}", result.ticker);
    if result.table.is_empty() {
        return no_data(heading, result);
    }
    data_section(heading, result)
}

/// Like the stock section, but an index whose close column carries no
/// usable value gets its own warning instead of an empty chart.
fn index_section(result: &Normalized) -> Section {
    let heading = format!("Index Data for {}", result.ticker);
    if result.table.is_empty() {
        return no_data(heading, result);
    }
    if !result.table.has_values("Close") {
        return Section {
            heading,
            ticker: result.ticker.clone(),
            content: Content::Warning {
                message: format!(
                    "No 'Close' column found in the index data for {}",
                    result.ticker
                ),
            },
            cause: None,
        };
    }
    data_section(heading, result)
}

fn data_section(heading: String, result: &Normalized) -> Section {
    Section {
        heading,
        ticker: result.ticker.clone(),
        content: Content::Data {
            tail: result.table.tail(TAIL_ROWS).to_vec(),
            chart: result.table.close_series(),
        },
        cause: None,
    }
}

fn no_data(heading: String, result: &Normalized) -> Section {
    Section {
        heading,
        ticker: result.ticker.clone(),
        content: Content::Warning {
            message: format!("No data available for {}", result.ticker),
        },
        cause: result.error.as_ref().map(|e| Cause {
            kind: e.kind(),
            detail: e.to_string(),
        }),
    }
}

fn insight(result: &Normalized) -> Option<String> {
    let close = result.table.latest_close()?;
    Some(format_insight(&result.ticker, close))
}

/// `Latest closing price for <ticker>: $<close>` with two decimals.
pub fn format_insight(ticker: &str, close: f64) -> String {
    format!("Latest closing price for {}: ${:.2}", ticker, close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_common::tickers::{IndexTicker, StockTicker};
    use std::fs;
    use tempfile::TempDir;

    const AAPL: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n\
        2024-01-01,1,1,1,1,1,10\n\
        2024-01-02,2,2,2,2,2,20\n\
        2024-01-03,3,3,3,3,3,30\n\
        2024-01-04,4,4,4,4,4,40\n\
        2024-01-05,5,5,5,5,5,50\n\
        2024-01-08,6,6,6,185.644,6,60\n";

    fn data_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (ticker, body) in files {
            fs::write(dir.path().join(format!("{ticker}.csv")), body).unwrap();
        }
        dir
    }

    #[test]
    fn idle_request_loads_nothing() {
        let normalizer = Normalizer::new("/definitely/not/here");
        let model = handle_request(&normalizer, &Selection::default(), false);
        assert!(!model.submitted);
        assert!(model.sections.is_empty());
        assert!(model.insights.is_empty());
        assert_eq!(model.title, TITLE);
    }

    #[test]
    fn submit_renders_data_and_missing_index() {
        let dir = data_dir(&[("AAPL", AAPL)]);
        let normalizer = Normalizer::new(dir.path());
        let model = handle_request(&normalizer, &Selection::default(), true);

        assert_eq!(model.sections.len(), 2);
        let stock = &model.sections[0];
        assert_eq!(stock.heading, "Stock Data for AAPL");
        match &stock.content {
            Content::Data { tail, chart } => {
                assert_eq!(tail.len(), TAIL_ROWS);
                assert_eq!(tail[0].close, 2.0);
                assert_eq!(chart.len(), 6);
            }
            other => panic!("expected data, got {other:?}"),
        }

        let index = &model.sections[1];
        assert_eq!(index.heading, "Index Data for IXIC");
        assert_eq!(
            index.content,
            Content::Warning {
                message: "No data available for IXIC".into()
            }
        );
        assert_eq!(index.cause.as_ref().unwrap().kind, "source_not_found");

        assert_eq!(model.insights, vec!["Latest closing price for AAPL: $185.64"]);
    }

    #[test]
    fn malformed_source_keeps_its_cause() {
        let dir = data_dir(&[("GOOGL", "Date,Close\n2024-01-02,1\n"), ("GSPC", AAPL)]);
        let normalizer = Normalizer::new(dir.path());
        let selection = Selection::new(StockTicker::GOOGL, IndexTicker::GSPC);
        let model = handle_request(&normalizer, &selection, true);

        let stock = &model.sections[0];
        assert!(!stock.has_data());
        assert_eq!(stock.cause.as_ref().unwrap().kind, "schema_incomplete");
        assert!(model.sections[1].has_data());
        assert_eq!(model.insights, vec!["Latest closing price for GSPC: $185.64"]);
    }

    #[test]
    fn index_without_close_values_gets_its_own_warning() {
        let dir = data_dir(&[(
            "IXIC",
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,0,,5\n2024-01-03,1,2,0,n/a,5\n",
        )]);
        let model = handle_request(&Normalizer::new(dir.path()), &Selection::default(), true);

        let index = &model.sections[1];
        assert_eq!(
            index.content,
            Content::Warning {
                message: "No 'Close' column found in the index data for IXIC".into()
            }
        );
        assert!(index.cause.is_none());
    }

    #[test]
    fn insight_uses_two_decimals() {
        assert_eq!(format_insight("MSFT", 402.5), "Latest closing price for MSFT: $402.50");
        assert_eq!(format_insight("IXIC", 14_855.004), "Latest closing price for IXIC: $14855.00");
    }

    #[test]
    fn model_serializes_with_tagged_content() {
        let dir = data_dir(&[]);
        let model = handle_request(&Normalizer::new(dir.path()), &Selection::default(), true);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["selection"]["stock"], "AAPL");
        assert_eq!(json["sections"][0]["content"]["kind"], "warning");
        assert_eq!(json["sections"][0]["cause"]["kind"], "source_not_found");
    }
}
