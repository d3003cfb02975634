//! Terminal Market Dashboard — fetches quote snapshots for a watchlist and
//! redraws watchlist/holdings tables plus ASCII price charts in place. It
//! runs until Ctrl+C; a symbol-scoped feed failure costs one row for one
//! cycle, while a cycle-level failure shows an error frame and retries
//! after a backoff.
//!
//! Usage example (CLI):
//! ```bash
//! dash_terminal --refresh-secs 5 --watchlist ./tickers.txt --charts 2
//! ```
//!
//! The watchlist file may separate symbols by commas, spaces, or new lines.
//! See `dash_common::tickers` for details.
#![warn(missing_docs)]
mod args;
mod chart;
mod dashboard;
mod format;
mod frame;
mod holdings;
mod port;
mod shutdown;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use dash_common::tickers::{default_watchlist, TickerParser};
use dash_common::{DashboardError, Result, Ticker};
use dash_feed::{ChaosOdds, SyntheticFeed};
use log::info;

use crate::args::Args;
use crate::chart::ChartRenderer;
use crate::dashboard::{Dashboard, DashboardConfig};
use crate::holdings::Holding;
use crate::port::ConsolePort;
use crate::shutdown::Shutdown;

/// Failure odds armed by `--chaos`.
const CHAOS_ODDS: ChaosOdds = ChaosOdds {
    per_symbol: 0.05,
    outage: 0.02,
};

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Shutdown::install()?;

    let watchlist = load_watchlist(args.watchlist.as_deref())?;
    let holdings = load_holdings(args.holdings.as_deref())?;
    let renderer = ChartRenderer::new(args.chart_width, args.chart_height)?;

    let mut feed = SyntheticFeed::new();
    if args.chaos {
        feed = feed.with_chaos(CHAOS_ODDS);
    }

    let config = DashboardConfig {
        watchlist,
        holdings,
        refresh: Duration::from_secs(args.refresh_secs),
        backoff: Duration::from_secs(args.backoff_secs),
        chart_count: args.charts,
    };

    info!("Dashboard is running. Press Ctrl+C to exit.");
    let mut dashboard = Dashboard::new(config, renderer, feed, ConsolePort::new(), shutdown);
    dashboard.run();

    println!("Exiting...");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Load the watchlist from `path`, or fall back to the built-in default.
fn load_watchlist(path: Option<&Path>) -> Result<Vec<Ticker>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let tickers = Ticker::parse_from_file(BufReader::new(file))?;
            if tickers.is_empty() {
                return Err(DashboardError::ParseWatchlistFile(format!(
                    "no tickers found in {}",
                    path.display()
                )));
            }
            info!("Watchlist loaded from {}: {:?}", path.display(), tickers);
            Ok(tickers)
        }
        None => Ok(default_watchlist()),
    }
}

/// Load holdings from `path`, or fall back to the built-in default.
fn load_holdings(path: Option<&Path>) -> Result<Vec<Holding>> {
    match path {
        Some(path) => {
            let rows = holdings::load_from_file(path)?;
            info!("Holdings loaded from {}: {} rows", path.display(), rows.len());
            Ok(rows)
        }
        None => Ok(holdings::default_holdings()),
    }
}
