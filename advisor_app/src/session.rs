//! Interactive prompt standing in for the dashboard sidebar.
//!
//! The session keeps the current `Selection` and re-runs the request handler on
//! every `submit`. Bad input is reported and the loop keeps going; only I/O
//! failures on the streams end it.
use std::fmt::Arguments;
use std::io::{BufRead, ErrorKind, Write};

use advisor_common::{Normalizer, Result};
use log::{debug, info, warn};

use crate::args::OutputFormat;
use crate::chart::ChartSize;
use crate::model::command::{Command, help_lines};
use crate::model::render::handle_request;
use crate::model::selection::Selection;
use crate::view::render;

/// Prompt printed before each input line.
const PROMPT: &str = "> ";

/// State of one interactive run.
pub struct Session<'a> {
    normalizer: &'a Normalizer,
    selection: Selection,
    format: OutputFormat,
    chart: ChartSize,
}

impl<'a> Session<'a> {
    /// Creates a session starting from `selection`.
    pub fn new(
        normalizer: &'a Normalizer,
        selection: Selection,
        format: OutputFormat,
        chart: ChartSize,
    ) -> Self {
        Self {
            normalizer,
            selection,
            format,
            chart,
        }
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// Rendered pages go to `out`. The prompt and status lines go to `out` too
    /// in text mode, but to `notes` in JSON mode so `out` stays a stream of
    /// JSON documents.
    pub fn run<R: BufRead, W: Write, N: Write>(
        &mut self,
        input: R,
        out: &mut W,
        notes: &mut N,
    ) -> Result<()> {
        info!("Interactive session started in {:?}", self.normalizer.base_dir());
        self.write_idle(out, notes)?;

        let mut lines = input.lines();
        loop {
            self.note(out, notes, format_args!("{}", PROMPT))?;
            out.flush()?;
            notes.flush()?;

            let Some(line) = lines.next() else {
                self.note(out, notes, format_args!("\n"))?;
                break;
            };
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!("Rejected input that is not valid UTF-8: {}", e);
                    self.note(out, notes, format_args!("Input must be UTF-8 text\n"))?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.apply(command, out, notes)?,
                Err(e) => {
                    warn!("Rejected input {:?}: {}", line, e);
                    self.note(out, notes, format_args!("{} (type 'help' for commands)\n", e))?;
                }
            }
        }

        info!("Interactive session finished");
        Ok(())
    }

    fn apply<W: Write, N: Write>(
        &mut self,
        command: Command,
        out: &mut W,
        notes: &mut N,
    ) -> Result<()> {
        debug!("Command: {:?}", command);
        match command {
            Command::Stock(stock) => {
                self.selection.stock = stock;
                self.note(out, notes, format_args!("Stock set to {}\n", stock))?;
            }
            Command::Index(index) => {
                self.selection.index = index;
                self.note(out, notes, format_args!("Index set to {}\n", index))?;
            }
            Command::Show => {
                let Selection { stock, index } = self.selection;
                self.note(out, notes, format_args!("Stock: {}  Index: {}\n", stock, index))?;
            }
            Command::Help => {
                for line in help_lines() {
                    self.note(out, notes, format_args!("  {}\n", line))?;
                }
            }
            Command::Submit => {
                let model = handle_request(self.normalizer, &self.selection, true);
                render(&model, self.format, self.chart, out)?;
            }
            Command::Quit => {}
        }
        Ok(())
    }

    fn write_idle<W: Write, N: Write>(&self, out: &mut W, notes: &mut N) -> Result<()> {
        let model = handle_request(self.normalizer, &self.selection, false);
        render(&model, self.format, self.chart, out)?;
        self.note(out, notes, format_args!("Type 'help' for commands.\n"))
    }

    /// Writes a prompt or status line where it does not disturb the rendered output.
    fn note<W: Write, N: Write>(
        &self,
        out: &mut W,
        notes: &mut N,
        text: Arguments<'_>,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => out.write_fmt(text)?,
            OutputFormat::Json => notes.write_fmt(text)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_common::tickers::{IndexTicker, StockTicker};
    use std::fs;

    fn run_in(
        normalizer: &Normalizer,
        format: OutputFormat,
        script: &[u8],
    ) -> (Selection, String, String) {
        let mut session =
            Session::new(normalizer, Selection::default(), format, ChartSize::default());
        let mut out = Vec::new();
        let mut notes = Vec::new();
        session.run(script, &mut out, &mut notes).unwrap();
        (
            session.selection(),
            String::from_utf8(out).unwrap(),
            String::from_utf8(notes).unwrap(),
        )
    }

    fn run(normalizer: &Normalizer, script: &str) -> (Selection, String) {
        let (selection, out, notes) = run_in(normalizer, OutputFormat::Text, script.as_bytes());
        assert!(notes.is_empty());
        (selection, out)
    }

    #[test]
    fn selection_changes_are_kept_until_submit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("NFLX.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,0.5,491.19,100\n",
        )
        .unwrap();
        let normalizer = Normalizer::new(dir.path());

        let (selection, out) = run(&normalizer, "stock nflx\nindex gspc\nsubmit\nquit\n");
        assert_eq!(selection, Selection::new(StockTicker::NFLX, IndexTicker::GSPC));
        assert!(out.contains("Stock set to NFLX"));
        assert!(out.contains("== Stock Data for NFLX =="));
        assert!(out.contains("WARNING: No data available for GSPC"));
        assert!(out.contains("Latest closing price for NFLX: $491.19"));
    }

    #[test]
    fn bad_lines_do_not_stop_the_session() {
        let normalizer = Normalizer::new("/nowhere");
        let (selection, out) = run(&normalizer, "stock IBM\nfly\n\nindex gspc\nshow\n");
        assert_eq!(selection.index, IndexTicker::GSPC);
        assert!(out.contains("Unknown ticker: IBM"));
        assert!(out.contains("Invalid command: fly"));
        assert!(out.contains("Stock: AAPL  Index: GSPC"));
    }

    #[test]
    fn every_submit_is_recomputed() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = Normalizer::new(dir.path());
        let (_, out) = run(&normalizer, "submit\nsubmit\n");
        assert_eq!(out.matches("No data available for AAPL").count(), 2);
    }

    #[test]
    fn json_mode_keeps_stdout_parseable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AAPL.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,0.5,185.64,100\n",
        )
        .unwrap();
        let normalizer = Normalizer::new(dir.path());

        let (_, out, notes) =
            run_in(&normalizer, OutputFormat::Json, b"stock aapl\nhelp\nsubmit\nquit\n");
        let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&out)
            .into_iter::<serde_json::Value>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["submitted"], false);
        assert_eq!(documents[1]["insights"][0], "Latest closing price for AAPL: $185.64");
        assert!(notes.contains("Stock set to AAPL"));
        assert!(notes.contains("> "));
        assert!(!out.contains("> "));
    }

    #[test]
    fn invalid_utf8_line_is_rejected_and_the_session_continues() {
        let normalizer = Normalizer::new("/nowhere");
        let (selection, out, _) =
            run_in(&normalizer, OutputFormat::Text, b"stock \xff\xfe\nindex gspc\nshow\n");
        assert!(out.contains("Input must be UTF-8 text"));
        assert_eq!(selection.index, IndexTicker::GSPC);
        assert!(out.contains("Stock: AAPL  Index: GSPC"));
    }
}
