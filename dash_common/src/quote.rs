//! Quote snapshot model and the market data provider contract.
//!
//! A `QuoteSnapshot` is the per-ticker record one refresh cycle works with.
//! Every field the dashboard reads defensively is an explicit `Option`; the
//! renderer substitutes placeholders instead of failing. Percent change is
//! derived on demand rather than stored, so it can never disagree with the
//! prices it came from.

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::tickers::Ticker;

/// Ordered price samples for one symbol, oldest first.
pub type PriceSeries = Vec<f64>;

/// Point-in-time market data for a single ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSnapshot {
    /// Symbol this snapshot belongs to.
    pub ticker: Ticker,
    /// Human-readable instrument name; feeds fall back to the symbol text.
    pub name: String,
    /// Last traded price, when the feed knows one.
    pub price: Option<f64>,
    /// Previous session close, the basis for percent change.
    pub previous_close: Option<f64>,
    /// Highest price seen in the current session.
    pub day_high: Option<f64>,
    /// Lowest price seen in the current session.
    pub day_low: Option<f64>,
    /// Traded volume, when the feed reports one.
    pub volume: Option<u64>,
    /// Recent closing prices; may be too short to chart.
    pub closes: PriceSeries,
    /// UTC timestamp in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl QuoteSnapshot {
    /// Percent change against the previous close.
    ///
    /// Defined only when both the current price and a nonzero previous close
    /// are known; otherwise the change reads as zero. Callers that need to
    /// tell a missing basis from a true zero check [`Self::has_change_basis`].
    pub fn percent_change(&self) -> f64 {
        match (self.price, self.previous_close) {
            (Some(price), Some(prev)) if prev != 0.0 => (price - prev) / prev * 100.0,
            _ => 0.0,
        }
    }

    /// True when a genuine percent change can be computed.
    pub fn has_change_basis(&self) -> bool {
        matches!(
            (self.price, self.previous_close),
            (Some(_), Some(prev)) if prev != 0.0
        )
    }
}

/// Per-ticker outcome of one fetch pass.
///
/// Failures stay attached to the ticker that produced them instead of
/// aborting the rest of the watchlist; the frame composer matches on
/// `outcome` to decide between a table row and a skip note.
#[derive(Debug)]
pub struct FetchResult {
    /// Symbol the fetch was attempted for.
    pub ticker: Ticker,
    /// Snapshot on success, cause on failure.
    pub outcome: Result<QuoteSnapshot, DashboardError>,
}

/// Market data provider contract.
///
/// The dashboard treats the provider as an opaque capability: transport,
/// caching, and authentication are implementation concerns. Implementations
/// may mutate internal state per call; the bundled synthetic feed advances
/// its random walk on every fetch.
pub trait QuoteSource {
    /// Fetch the current snapshot and recent history for one ticker.
    ///
    /// Symbol-scoped failures (`QuoteUnavailable`, `TickerNotFound`) cost
    /// only this ticker its row for the cycle; a cycle-level failure
    /// (`FeedUnreachable`, I/O) aborts the whole fetch pass.
    fn fetch_quote(&mut self, ticker: &Ticker) -> Result<QuoteSnapshot, DashboardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: Option<f64>, previous_close: Option<f64>) -> QuoteSnapshot {
        QuoteSnapshot {
            ticker: "AAPL".parse().unwrap(),
            name: "Apple Inc.".to_string(),
            price,
            previous_close,
            ..QuoteSnapshot::default()
        }
    }

    #[test]
    fn percent_change_is_derived_from_both_prices() {
        let gained = snapshot(Some(110.0), Some(100.0));
        assert!((gained.percent_change() - 10.0).abs() < 1e-9);
        assert!(gained.has_change_basis());

        let lost = snapshot(Some(95.0), Some(100.0));
        assert!((lost.percent_change() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn missing_or_zero_basis_reads_as_zero_change() {
        assert_eq!(snapshot(Some(110.0), None).percent_change(), 0.0);
        assert_eq!(snapshot(None, Some(100.0)).percent_change(), 0.0);
        assert_eq!(snapshot(Some(110.0), Some(0.0)).percent_change(), 0.0);

        assert!(!snapshot(Some(110.0), None).has_change_basis());
        assert!(!snapshot(Some(110.0), Some(0.0)).has_change_basis());
        assert!(snapshot(Some(100.0), Some(100.0)).has_change_basis());
    }
}
