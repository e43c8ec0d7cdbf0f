//! Close-price line chart drawn with ratatui into an off-screen buffer.
//!
//! Widgets are rendered into a `Buffer` of the requested size and the buffer is
//! turned back into plain lines, so text mode never takes over the terminal.
//! Non-finite closes are skipped; the x axis is the row position, labelled with
//! the first and last dates.
use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget};

/// Line printed instead of a chart when no close value is finite.
pub const NO_VALUES: &str = "(no plottable close values)";

/// Chart area, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    /// Columns, including the value labels.
    pub width: u16,
    /// Rows, including the date axis.
    pub height: u16,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 60,
            height: 10,
        }
    }
}

/// Renders `widget` into a `width` x `height` buffer and returns its rows,
/// trailing blanks trimmed.
pub fn render_lines<W: Widget>(widget: W, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_lines(&buf)
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = usize::from(buf.area.width.max(1));
    buf.content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Line chart of the `(date, close)` series, exactly `size.height` lines.
pub fn render_chart(series: &[(NaiveDate, f64)], size: ChartSize) -> Vec<String> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .filter(|(_, (_, close))| close.is_finite())
        .map(|(n, (_, close))| (n as f64, *close))
        .collect();
    let first = first_finite(series);
    let last = first_finite(series.iter().rev());
    let (Some(first), Some(last)) = (first, last) else {
        return vec![NO_VALUES.to_string()];
    };

    let (x_min, x_max) = padded(points[0].0, points[points.len() - 1].0);
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));
    let (y_min, y_max) = padded(lo, hi);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .data(&points);
    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec![Span::raw(first.to_string()), Span::raw(last.to_string())]),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.2}", lo)),
                    Span::raw(format!("{:.2}", hi)),
                ]),
        );

    render_lines(chart, size.width, size.height)
}

fn first_finite<'a, I>(series: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a (NaiveDate, f64)>,
{
    series
        .into_iter()
        .find(|(_, close)| close.is_finite())
        .map(|(date, _)| *date)
}

/// Widens a degenerate range so a flat series or a single point lands mid-chart.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}
