//! Writers turning a `RenderModel` into terminal output.
use std::io::Write;

use advisor_common::{PriceRow, Result};
use ratatui::layout::{Alignment, Constraint};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row, Table};

use crate::args::OutputFormat;
use crate::chart::{ChartSize, render_chart, render_lines};
use crate::model::render::{Content, RenderModel, Section};

/// Writes `model` to `out` in the requested format.
pub fn render<W: Write>(
    model: &RenderModel,
    format: OutputFormat,
    chart: ChartSize,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(model, chart, out),
        OutputFormat::Json => render_json(model, out),
    }
}

/// Pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(model: &RenderModel, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, model)?;
    writeln!(out)?;
    Ok(())
}

/// Human-readable page: sections, charts, warnings and insights.
pub fn render_text<W: Write>(model: &RenderModel, chart: ChartSize, out: &mut W) -> Result<()> {
    writeln!(out, "{}", model.title)?;
    writeln!(
        out,
        "Stock: {}  Index: {}",
        model.selection.stock, model.selection.index
    )?;

    if !model.submitted {
        writeln!(out, "Select a stock and an index, then submit.")?;
        return Ok(());
    }

    for section in &model.sections {
        render_section(section, chart, out)?;
    }

    writeln!(out)?;
    writeln!(out, "== Insights ==")?;
    for line in &model.insights {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn render_section<W: Write>(section: &Section, chart: ChartSize, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", section.heading)?;
    match &section.content {
        Content::Warning { message } => writeln!(out, "WARNING: {}", message)?,
        Content::Data { tail, chart: series } => {
            for line in table_lines(tail) {
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
            for line in render_chart(series, chart) {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Widths of the tail table columns.
const TABLE_WIDTHS: [u16; 6] = [10, 12, 12, 12, 12, 14];
const TABLE_HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// The tail rows as a ratatui `Table`, one line per row under a header line.
pub fn table_lines(rows: &[PriceRow]) -> Vec<String> {
    let header = Row::new(
        TABLE_HEADER
            .iter()
            .enumerate()
            .map(|(n, title)| cell(n, title.to_string())),
    );
    let body = rows.iter().map(|row| {
        Row::new(
            [
                row.date.to_string(),
                format!("{:.2}", row.open),
                format!("{:.2}", row.high),
                format!("{:.2}", row.low),
                format!("{:.2}", row.close),
                format!("{:.0}", row.volume),
            ]
            .into_iter()
            .enumerate()
            .map(|(n, text)| cell(n, text)),
        )
    });
    let table = Table::new(body, TABLE_WIDTHS.map(Constraint::Length)).header(header);

    let width = TABLE_WIDTHS.iter().sum::<u16>() + TABLE_WIDTHS.len() as u16 - 1;
    let height = u16::try_from(rows.len() + 1).unwrap_or(u16::MAX);
    render_lines(table, width, height)
}

/// Dates sit left, numbers right.
fn cell(column: usize, text: String) -> Cell<'static> {
    let line = Line::from(text);
    if column == 0 {
        Cell::from(line)
    } else {
        Cell::from(line.alignment(Alignment::Right))
    }
}
