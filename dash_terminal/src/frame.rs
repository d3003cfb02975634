//! Composed frame model and frame composition.
//!
//! The dashboard loop builds a `Frame` out of one cycle's fetch results and
//! hands it to an output port for styling and writing. Cells carry semantic
//! `Tone` tags rather than colors, so the same frame can go to a colored
//! terminal or a plain test capture. Composition is pure and never fails:
//! missing data becomes placeholders and failed symbols become skip notes.

use chrono::{DateTime, Local};
use dash_common::{FetchResult, QuoteSnapshot, Ticker};

use crate::chart::{ChartRenderer, RenderedChart};
use crate::format;
use crate::holdings::{self, Holding};

/// Dashboard title shown in the frame header.
const TITLE: &str = "MARKET DASHBOARD";
/// Text shown in a chart block when the series is too short to chart.
const NO_CHART_DATA: &str = "no chart data";

/// Semantic styling tag; the output port maps tones to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    /// Default foreground.
    #[default]
    Neutral,
    /// Favorable values (gains, totals).
    Positive,
    /// Unfavorable values (losses, errors).
    Negative,
    /// Identifiers (tickers, headers).
    Accent,
    /// De-emphasized chrome (footer, skip notes).
    Dim,
    /// Chart glyphs and status highlights.
    Emphasis,
}

/// One styled fragment of frame text.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Text content.
    pub text: String,
    /// Semantic tone for the port to style.
    pub tone: Tone,
}

impl Cell {
    /// Cell with an explicit tone.
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Neutral-toned cell.
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }
}

/// One titled table: header cells plus rows of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSpec {
    /// Table title, printed above the table body.
    pub title: String,
    /// Column header cells.
    pub header: Vec<Cell>,
    /// Data rows.
    pub rows: Vec<Vec<Cell>>,
}

impl TableSpec {
    fn new(title: &str, header: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            header: header.iter().map(|h| Cell::new(*h, Tone::Accent)).collect(),
            rows: Vec::new(),
        }
    }

    /// True when the table carries no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One chart block: the ticker plus its rendered chart, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBlock {
    /// Charted symbol.
    pub ticker: Ticker,
    /// Chart, or `None` when the series was too short.
    pub chart: Option<RenderedChart>,
}

impl ChartBlock {
    /// Chart body as display text: axis labels plus glyph rows, top first.
    pub fn body(&self) -> String {
        match &self.chart {
            Some(chart) => chart.lines(),
            None => NO_CHART_DATA.to_string(),
        }
    }
}

/// Everything one redraw presents, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Dashboard title.
    pub title: Cell,
    /// LIVE / RETRY indicator next to the title.
    pub status: Cell,
    /// Watchlist table, one row per successfully fetched symbol.
    pub watchlist: TableSpec,
    /// Static holdings table with a TOTAL row.
    pub holdings: TableSpec,
    /// Chart blocks for the leading watchlist symbols.
    pub charts: Vec<ChartBlock>,
    /// Symbols skipped this cycle, with causes.
    pub skipped: Vec<Cell>,
    /// Cycle-level failure notice, when present.
    pub notice: Option<Cell>,
    /// Redraw timestamp, interval note, and quit hint.
    pub footer: Cell,
}

/// Compose a regular frame from one cycle's fetch results.
///
/// Failed symbols are excluded from the watchlist table and the chart
/// subset and listed as skip notes instead; missing optional fields render
/// as placeholders. `chart_count` picks how many leading watchlist symbols
/// get a chart and is clamped to at least one.
pub fn compose(
    results: &[FetchResult],
    holdings_rows: &[Holding],
    renderer: &ChartRenderer,
    chart_count: usize,
    refresh_secs: u64,
    now: DateTime<Local>,
) -> Frame {
    let mut watchlist = TableSpec::new("Watchlist", &["Sym", "Price", "Chg", "High", "Low", "Vol"]);
    let mut skipped = Vec::new();

    for result in results {
        match &result.outcome {
            Ok(snapshot) => {
                watchlist.rows.push(vec![
                    Cell::new(result.ticker.as_str(), Tone::Accent),
                    Cell::neutral(format::opt_price(snapshot.price)),
                    Cell::new(format::snapshot_change(snapshot), change_tone(snapshot)),
                    Cell::neutral(format::opt_price(snapshot.day_high)),
                    Cell::neutral(format::opt_price(snapshot.day_low)),
                    Cell::neutral(format::opt_volume(snapshot.volume)),
                ]);
            }
            Err(cause) => {
                skipped.push(Cell::new(
                    format!("{} skipped: {}", result.ticker, cause),
                    Tone::Dim,
                ));
            }
        }
    }

    let charts = results
        .iter()
        .take(chart_count.max(1))
        .filter_map(|result| match &result.outcome {
            Ok(snapshot) => Some(ChartBlock {
                ticker: result.ticker.clone(),
                chart: renderer.render(&snapshot.closes),
            }),
            Err(_) => None,
        })
        .collect();

    Frame {
        title: Cell::new(TITLE, Tone::Accent),
        status: Cell::new("LIVE", Tone::Positive),
        watchlist,
        holdings: holdings_table(holdings_rows),
        charts,
        skipped,
        notice: None,
        footer: footer(now, format!("refresh {refresh_secs}s")),
    }
}

/// Compose the error frame shown while backing off after a cycle-level
/// failure.
pub fn compose_error(cause: &str, backoff_secs: u64, now: DateTime<Local>) -> Frame {
    Frame {
        title: Cell::new(TITLE, Tone::Accent),
        status: Cell::new("RETRY", Tone::Negative),
        watchlist: TableSpec::default(),
        holdings: TableSpec::default(),
        charts: Vec::new(),
        skipped: Vec::new(),
        notice: Some(Cell::new(format!("Error: {cause}"), Tone::Negative)),
        footer: footer(now, format!("retrying in {backoff_secs}s")),
    }
}

fn holdings_table(rows: &[Holding]) -> TableSpec {
    let mut table = TableSpec::new("Portfolio", &["Asset", "Value", "Pct"]);
    for holding in rows {
        table.rows.push(vec![
            Cell::new(holding.asset.as_str(), Tone::Accent),
            Cell::neutral(format::dollars(holding.value)),
            Cell::neutral(format::weight(holding.weight_pct)),
        ]);
    }
    if !rows.is_empty() {
        table.rows.push(vec![
            Cell::new("TOTAL", Tone::Positive),
            Cell::new(format::dollars(holdings::total_value(rows)), Tone::Positive),
            Cell::neutral(""),
        ]);
    }
    table
}

fn change_tone(snapshot: &QuoteSnapshot) -> Tone {
    if !snapshot.has_change_basis() {
        Tone::Dim
    } else if snapshot.percent_change() >= 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

fn footer(now: DateTime<Local>, interval_note: String) -> Cell {
    Cell::new(
        format!(
            "Updated: {} | {} | Ctrl+C to exit",
            now.format("%H:%M:%S"),
            interval_note
        ),
        Tone::Dim,
    )
}
