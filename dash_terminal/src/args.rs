//! Command-line arguments for the dashboard.
//!
//! This module defines the CLI interface using `clap`. Every flag is
//! optional; the defaults reproduce the stock configuration (10 second
//! refresh, 5 second backoff, 50x10 charts for the first three watchlist
//! symbols). See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;

/// Default seconds between successful refresh cycles.
pub const DEFAULT_REFRESH_SECS: u64 = 10;
/// Default seconds to wait before retrying after a cycle-level failure.
pub const DEFAULT_BACKOFF_SECS: u64 = 5;
/// Default chart width in columns.
pub const DEFAULT_CHART_WIDTH: usize = 50;
/// Default chart height in rows.
pub const DEFAULT_CHART_HEIGHT: usize = 10;
/// Default number of leading watchlist symbols charted per cycle.
pub const DEFAULT_CHART_COUNT: usize = 3;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seconds to sleep between refresh cycles.
    #[clap(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Seconds to sleep before retrying after a cycle-level failure.
    #[clap(long, default_value_t = DEFAULT_BACKOFF_SECS)]
    pub backoff_secs: u64,

    /// Chart width in columns.
    #[clap(long, default_value_t = DEFAULT_CHART_WIDTH)]
    pub chart_width: usize,

    /// Chart height in rows.
    #[clap(long, default_value_t = DEFAULT_CHART_HEIGHT)]
    pub chart_height: usize,

    /// How many leading watchlist symbols get a chart (at least one).
    #[clap(long = "charts", default_value_t = DEFAULT_CHART_COUNT)]
    pub charts: usize,

    /// Path to a text file with watchlist tickers.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub watchlist: Option<PathBuf>,

    /// Path to a JSON file with static portfolio holdings.
    #[clap(long)]
    pub holdings: Option<PathBuf>,

    /// Inject random feed failures to exercise the recovery paths.
    #[clap(long)]
    pub chaos: bool,
}
