//! Commands accepted by the interactive prompt.
//!
//! A line is a keyword optionally followed by one argument:
//! `stock <TICKER>`, `index <TICKER>`, `submit`, `show`, `help`, `quit`.
//! Keywords are case-insensitive.
use std::str::FromStr;

use advisor_common::AdvisorError;
use advisor_common::tickers::{IndexTicker, StockTicker, TickerSet};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Leading word of a prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Keyword {
    /// Change the selected stock.
    Stock,
    /// Change the selected index.
    Index,
    /// Load both selections and render them.
    Submit,
    /// Print the current selection.
    Show,
    /// Print the command list.
    Help,
    /// Leave the prompt (`exit` works too).
    #[strum(to_string = "quit", serialize = "exit")]
    Quit,
}

impl Keyword {
    fn usage(self) -> String {
        match self {
            Keyword::Stock => format!("stock <{}>", StockTicker::catalog().replace(", ", "|")),
            Keyword::Index => format!("index <{}>", IndexTicker::catalog().replace(", ", "|")),
            other => other.to_string(),
        }
    }
}

/// A parsed prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a stock.
    Stock(StockTicker),
    /// Select an index.
    Index(IndexTicker),
    /// The "Submit" trigger.
    Submit,
    /// Print the current selection.
    Show,
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

impl FromStr for Command {
    type Err = AdvisorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| AdvisorError::InvalidCommand(String::new()))?;
        let keyword = Keyword::from_str(head)
            .map_err(|_| AdvisorError::InvalidCommand(head.to_string()))?;
        let arg = words.next();
        if words.next().is_some() {
            return Err(AdvisorError::InvalidCommand(line.trim().to_string()));
        }

        let command = match (keyword, arg) {
            (Keyword::Stock, Some(symbol)) => Command::Stock(StockTicker::parse_symbol(symbol)?),
            (Keyword::Index, Some(symbol)) => Command::Index(IndexTicker::parse_symbol(symbol)?),
            (Keyword::Stock | Keyword::Index, None) => {
                return Err(AdvisorError::InvalidCommand(format!(
                    "'{}' expects a ticker",
                    keyword
                )));
            }
            (_, Some(_)) => {
                return Err(AdvisorError::InvalidCommand(format!(
                    "'{}' takes no argument",
                    keyword
                )));
            }
            (Keyword::Submit, None) => Command::Submit,
            (Keyword::Show, None) => Command::Show,
            (Keyword::Help, None) => Command::Help,
            (Keyword::Quit, None) => Command::Quit,
        };
        Ok(command)
    }
}

/// One usage line per keyword.
pub fn help_lines() -> Vec<String> {
    Keyword::iter().map(Keyword::usage).collect()
}
