//! Error types shared between the dashboard and its data feeds.
//!
//! The `DashboardError` enum unifies common failure cases for I/O,
//! serialization, configuration, and market data access, allowing crates to
//! propagate a single error type. Market data failures come in two scopes:
//! symbol-scoped errors cost one ticker one cycle, cycle-level errors cost
//! the whole refresh cycle. `is_cycle_level` encodes that split.
use std::io;

use thiserror::Error;

/// Unified error type shared by the dashboard and feed crates.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error originating from the standard library, files, or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing the watchlist file into `Ticker` values.
    #[error("Parse watchlist file error: {0}")]
    ParseWatchlistFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Chart geometry that cannot be rendered (zero width or height).
    #[error("Chart size error: {0}")]
    ChartSize(String),

    /// The feed itself is unreachable; no ticker can be quoted this cycle.
    #[error("Feed unreachable: {0}")]
    FeedUnreachable(String),

    /// One ticker could not be quoted; the rest of the watchlist is unaffected.
    #[error("Quote unavailable for {ticker}: {reason}")]
    QuoteUnavailable {
        /// Symbol the feed failed to quote.
        ticker: String,
        /// Provider-supplied failure cause.
        reason: String,
    },

    /// Internal logic error where a requested ticker symbol could not be resolved.
    #[error("Internal Logic Error: Ticker not found: {0}")]
    TickerNotFound(String),
}

impl DashboardError {
    /// True when the error dooms the whole refresh cycle rather than a
    /// single symbol.
    ///
    /// Transport-level feed failures and terminal I/O failures are
    /// cycle-level; everything else stays scoped to the ticker that
    /// produced it.
    pub fn is_cycle_level(&self) -> bool {
        matches!(
            self,
            DashboardError::FeedUnreachable(_) | DashboardError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_level_split_matches_failure_policy() {
        let unreachable = DashboardError::FeedUnreachable("dns down".to_string());
        let io = DashboardError::Io(io::Error::other("pipe closed"));
        assert!(unreachable.is_cycle_level());
        assert!(io.is_cycle_level());

        let unavailable = DashboardError::QuoteUnavailable {
            ticker: "AAPL".to_string(),
            reason: "halted".to_string(),
        };
        let not_found = DashboardError::TickerNotFound("ZZZZ".to_string());
        assert!(!unavailable.is_cycle_level());
        assert!(!not_found.is_cycle_level());
        assert!(!DashboardError::Format("bad flag".to_string()).is_cycle_level());
    }

    #[test]
    fn messages_name_the_failing_ticker() {
        let err = DashboardError::QuoteUnavailable {
            ticker: "BTC-USD".to_string(),
            reason: "stale book".to_string(),
        };
        assert_eq!(err.to_string(), "Quote unavailable for BTC-USD: stale book");
    }
}
