//! Synthetic market data feed.
//!
//! `SyntheticFeed` implements the `QuoteSource` contract entirely
//! in-process: every `fetch_quote` advances a per-ticker random walk, pushes
//! the new close onto a bounded history window, and returns a fully
//! populated `QuoteSnapshot`. State lives in the feed, so repeated fetches
//! for one ticker observe a single continuous price path.
//!
//! - The previous close is pinned to the seeded baseline, so the percent
//!   change drifts as the walk moves away from it.
//! - Unknown tickers fail with `TickerNotFound`, which the dashboard treats
//!   as symbol-scoped.
//! - `with_chaos` arms optional failure injection so the recovery paths can
//!   be watched live.

use std::collections::HashMap;

use chrono::Utc;
use dash_common::{DashboardError, PriceSeries, QuoteSnapshot, QuoteSource, Ticker};
use log::debug;
use rand::Rng;

use crate::walk;

/// Maximum number of closes kept per ticker.
pub const SERIES_CAP: usize = 96;
/// Walk steps taken at construction so charts are populated from the first frame.
pub const WARMUP_STEPS: usize = 72;

/// Failure-injection odds, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaosOdds {
    /// Chance that one fetch fails for its ticker only.
    pub per_symbol: f64,
    /// Chance that one fetch reports the whole feed unreachable.
    pub outage: f64,
}

/// Per-ticker walk state.
struct SeriesState {
    name: String,
    baseline: f64,
    last_price: f64,
    day_high: f64,
    day_low: f64,
    volume_base: u64,
    closes: PriceSeries,
}

impl SeriesState {
    fn new(name: String, baseline: f64, volume_base: u64) -> Self {
        Self {
            name,
            baseline,
            last_price: baseline,
            day_high: baseline,
            day_low: baseline,
            volume_base,
            closes: PriceSeries::with_capacity(SERIES_CAP),
        }
    }

    /// Advance the walk one step and record the new close.
    fn step(&mut self) -> f64 {
        let price = walk::next_price(self.last_price);
        self.last_price = price;
        self.day_high = self.day_high.max(price);
        self.day_low = self.day_low.min(price);
        self.closes.push(price);
        if self.closes.len() > SERIES_CAP {
            self.closes.remove(0);
        }
        price
    }
}

/// In-process random-walk implementation of `QuoteSource`.
pub struct SyntheticFeed {
    series: HashMap<Ticker, SeriesState>,
    chaos: Option<ChaosOdds>,
}

impl SyntheticFeed {
    /// Feed seeded with the built-in instrument universe.
    pub fn new() -> Self {
        Self::with_universe(default_universe())
    }

    /// Feed seeded with explicit `(ticker, name, baseline price, volume base)`
    /// rows.
    pub fn with_universe(universe: Vec<(Ticker, String, f64, u64)>) -> Self {
        let mut series = HashMap::new();
        for (ticker, name, baseline, volume_base) in universe {
            let mut state = SeriesState::new(name, baseline, volume_base);
            for _ in 0..WARMUP_STEPS {
                state.step();
            }
            series.insert(ticker, state);
        }
        Self {
            series,
            chaos: None,
        }
    }

    /// Arm failure injection with the given odds.
    pub fn with_chaos(mut self, odds: ChaosOdds) -> Self {
        self.chaos = Some(odds);
        self
    }
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteSource for SyntheticFeed {
    fn fetch_quote(&mut self, ticker: &Ticker) -> Result<QuoteSnapshot, DashboardError> {
        if let Some(odds) = self.chaos {
            let mut rng = rand::rng();
            if rng.random_bool(odds.outage) {
                return Err(DashboardError::FeedUnreachable(
                    "simulated feed outage".to_string(),
                ));
            }
            if rng.random_bool(odds.per_symbol) {
                return Err(DashboardError::QuoteUnavailable {
                    ticker: ticker.to_string(),
                    reason: "simulated symbol failure".to_string(),
                });
            }
        }

        let state = self
            .series
            .get_mut(ticker)
            .ok_or_else(|| DashboardError::TickerNotFound(ticker.to_string()))?;

        let price = state.step();
        debug!("synthetic quote for {ticker}: price={price:.2}");

        Ok(QuoteSnapshot {
            ticker: ticker.clone(),
            name: state.name.clone(),
            price: Some(price),
            previous_close: Some(state.baseline),
            day_high: Some(state.day_high),
            day_low: Some(state.day_low),
            volume: Some(walk::next_volume(state.volume_base)),
            closes: state.closes.clone(),
            timestamp: Utc::now().timestamp_millis() as u64,
        })
    }
}

/// Built-in universe: the default watchlist plus a few liquid extras.
pub fn default_universe() -> Vec<(Ticker, String, f64, u64)> {
    [
        ("BTC-USD", "Bitcoin USD", 67_234.0, 28_000_000_000),
        ("ETH-USD", "Ethereum USD", 3_456.0, 15_000_000_000),
        ("SOL-USD", "Solana USD", 142.33, 2_400_000_000),
        ("NVDA", "NVIDIA Corporation", 892.45, 45_000_000),
        ("AAPL", "Apple Inc.", 178.32, 52_000_000),
        ("MSFT", "Microsoft Corporation", 415.10, 21_000_000),
        ("TSLA", "Tesla, Inc.", 248.50, 95_000_000),
        ("GOOGL", "Alphabet Inc.", 165.30, 28_000_000),
    ]
    .into_iter()
    .map(|(symbol, name, baseline, volume_base)| {
        let ticker = symbol
            .parse()
            .expect("built-in universe symbols are valid tickers");
        (ticker, name.to_string(), baseline, volume_base)
    })
    .collect()
}
