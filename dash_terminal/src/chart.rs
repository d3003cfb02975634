//! ASCII price chart rendering.
//!
//! `ChartRenderer` maps a price series onto a fixed glyph grid with a
//! synchronized price axis. Rendering is pure: the same series and geometry
//! always produce the same chart, and nothing is mutated.
//!
//! Quantization scheme: each sampled value is normalized to `pct` in
//! `[0, 1]` over the sampled min/max range; a row `r` (0 = bottom) prints
//! the full block when `pct >= (r + 1) / height`, the half block when
//! `pct >= r / height`, and a blank otherwise. Columns therefore come out
//! as solid stacks: full blocks from the bottom, at most one half block on
//! top, blanks above.

use std::fmt::Write as _;

use dash_common::{DashboardError, Result};

/// Glyph for a row the value fully reaches.
const GLYPH_FULL: char = '█';
/// Glyph for the row carrying the value's fractional remainder.
const GLYPH_PARTIAL: char = '▄';
/// Glyph for rows above the value.
const GLYPH_BLANK: char = ' ';
/// Fixed width of the formatted axis label column.
pub const AXIS_LABEL_WIDTH: usize = 10;
/// Fixed decimal precision of axis labels.
const AXIS_PRECISION: usize = 2;

/// One rendered chart row: the price the row represents plus its glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    /// Price this row's threshold corresponds to.
    pub price: f64,
    /// One glyph per sampled column.
    pub glyphs: String,
}

impl ChartRow {
    /// Axis label, right-aligned to [`AXIS_LABEL_WIDTH`] with fixed precision.
    pub fn label(&self) -> String {
        format!(
            "{:>width$.prec$}",
            self.price,
            width = AXIS_LABEL_WIDTH,
            prec = AXIS_PRECISION
        )
    }
}

/// Chart produced by one render call: `height` rows, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// Rows in display order; the first row carries the price maximum.
    pub rows: Vec<ChartRow>,
}

impl RenderedChart {
    /// Rows as `label │glyphs` display lines, top first.
    pub fn lines(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = writeln!(out, "{} │{}", row.label(), row.glyphs);
        }
        out
    }
}

/// Fixed-geometry price chart renderer.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: usize,
    height: usize,
}

impl ChartRenderer {
    /// Build a renderer for a `width x height` glyph grid.
    ///
    /// Zero dimensions cannot be rendered and are rejected here, so the
    /// render path itself never fails.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DashboardError::ChartSize(format!(
                "chart geometry must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Render `series` into a glyph grid, or `None` for fewer than 2 samples.
    ///
    /// Long series are downsampled with a fixed stride so the chart never
    /// exceeds the configured width; short series simply come out narrower.
    /// A flat series quantizes against a nominal unit range and draws along
    /// the bottom row instead of dividing by zero.
    pub fn render(&self, series: &[f64]) -> Option<RenderedChart> {
        if series.len() < 2 {
            return None;
        }

        let step = (series.len() / self.width).max(1);
        let sampled: Vec<f64> = series
            .iter()
            .copied()
            .step_by(step)
            .take(self.width)
            .collect();

        let min_p = sampled.iter().copied().fold(f64::INFINITY, f64::min);
        let max_p = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max_p == min_p { 1.0 } else { max_p - min_p };

        let height = self.height as f64;
        let mut rows = Vec::with_capacity(self.height);
        for row in (0..self.height).rev() {
            let full_at = (row + 1) as f64 / height;
            let partial_at = row as f64 / height;
            let glyphs = sampled
                .iter()
                .map(|&price| {
                    let pct = (price - min_p) / range;
                    if pct >= full_at {
                        GLYPH_FULL
                    } else if pct >= partial_at {
                        GLYPH_PARTIAL
                    } else {
                        GLYPH_BLANK
                    }
                })
                .collect();
            rows.push(ChartRow {
                price: self.row_price(row, min_p, max_p),
                glyphs,
            });
        }

        Some(RenderedChart { rows })
    }

    /// Price represented by `row` (0 = bottom), interpolated over min..max.
    ///
    /// The divisor is clamped so a single-row chart is labeled with the
    /// sampled maximum instead of dividing by zero.
    fn row_price(&self, row: usize, min_p: f64, max_p: f64) -> f64 {
        let steps = (self.height - 1).max(1) as f64;
        let from_top = (self.height - 1 - row) as f64;
        max_p - (max_p - min_p) * from_top / steps
    }
}
