//! Output port for composed frames.
//!
//! `ConsolePort` is the production implementation: tones map to terminal
//! colors through `comfy-table`, the whole frame is rendered into one
//! buffer, and the buffer is written after a terminal reset in a single
//! locked pass, so the viewer never sees a partially drawn frame.

use std::fmt::Write as _;
use std::io::{self, Write};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell as TableCell, Color, ContentArrangement, Table};
use dash_common::Result;

use crate::frame::{Cell, ChartBlock, Frame, TableSpec, Tone};

/// Sink for composed frames.
pub trait FramePort {
    /// Style and write one frame; clearing and redrawing must look atomic
    /// to the viewer.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Production port writing styled frames to stdout.
#[derive(Debug, Default)]
pub struct ConsolePort;

impl ConsolePort {
    /// New stdout-backed port.
    pub fn new() -> Self {
        Self
    }
}

impl FramePort for ConsolePort {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let body = render_frame(frame);
        let mut stdout = io::stdout().lock();
        // ESC c resets the terminal so the frame redraws from the top left.
        write!(stdout, "{}c", 27 as char)?;
        stdout.write_all(body.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Render a whole frame to styled text. Pure; split out so tests can check
/// output without a terminal.
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();

    let mut header = Table::new();
    header.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    header.add_row(vec![to_cell(&frame.title), to_cell(&frame.status)]);
    let _ = writeln!(out, "{header}");

    if !frame.watchlist.is_empty() {
        let _ = writeln!(out, "{}", render_table(&frame.watchlist));
    }
    for skip in &frame.skipped {
        let _ = writeln!(out, "  {}", skip.text);
    }
    if !frame.holdings.is_empty() {
        let _ = writeln!(out, "{}", render_table(&frame.holdings));
    }
    if !frame.charts.is_empty() {
        let _ = writeln!(out, "{}", render_charts(&frame.charts));
    }
    if let Some(notice) = &frame.notice {
        let mut banner = Table::new();
        banner.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
        banner.add_row(vec![to_cell(notice)]);
        let _ = writeln!(out, "{banner}");
    }

    let _ = writeln!(out, "{}", frame.footer.text);
    out
}

fn render_table(spec: &TableSpec) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(spec.header.iter().map(to_cell).collect::<Vec<_>>());

    for row in &spec.rows {
        table.add_row(row.iter().map(to_cell).collect::<Vec<_>>());
    }

    format!("{}\n{table}", spec.title)
}

fn render_charts(blocks: &[ChartBlock]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            to_cell(&Cell::new("Sym", Tone::Accent)),
            to_cell(&Cell::new("Chart", Tone::Accent)),
        ]);

    for block in blocks {
        table.add_row(vec![
            to_cell(&Cell::new(block.ticker.as_str(), Tone::Accent)),
            to_cell(&Cell::new(
                block.body().trim_end().to_string(),
                Tone::Emphasis,
            )),
        ]);
    }

    format!("Charts\n{table}")
}

fn to_cell(cell: &Cell) -> TableCell {
    let rendered = TableCell::new(cell.text.as_str());
    match tone_color(cell.tone) {
        Some(color) => rendered.fg(color),
        None => rendered,
    }
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Neutral => None,
        Tone::Positive => Some(Color::Green),
        Tone::Negative => Some(Color::Red),
        Tone::Accent => Some(Color::Cyan),
        Tone::Dim => Some(Color::DarkGrey),
        Tone::Emphasis => Some(Color::Yellow),
    }
}
