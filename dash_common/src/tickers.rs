//! Ticker symbols and helpers for parsing watchlists.
//!
//! A `Ticker` wraps any exchange-style symbol (`AAPL`, `BTC-USD`, `^GSPC`)
//! rather than enumerating a closed set, since crypto pairs and indices use
//! punctuation no enum variant can carry. Parsing trims, validates the
//! character set and normalizes to uppercase so lookups and display agree.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Characters allowed in a ticker besides ASCII alphanumerics.
const TICKER_PUNCT: &[char] = &['-', '.', '^', '='];

/// Exchange-style ticker symbol, stored uppercase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Ticker(String);

impl Ticker {
    /// Symbol text as displayed.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::Format("empty ticker symbol".to_string()));
        }
        let upper = trimmed.to_ascii_uppercase();
        if !upper
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || TICKER_PUNCT.contains(&c))
        {
            return Err(DashboardError::Format(format!(
                "invalid ticker symbol: {trimmed}"
            )));
        }
        Ok(Ticker(upper))
    }
}

/// Trait providing file parsing for watchlists.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace, or new lines; empty
    /// fields are skipped. Returns an error if any symbol cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, DashboardError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, DashboardError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(DashboardError::Io)?;
            for field in line.split([',', ' ', '\t']) {
                let trimmed = field.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match trimmed.parse::<Self>() {
                    Ok(ticker) => tickers.push(ticker),
                    Err(e) => return Err(DashboardError::ParseWatchlistFile(e.to_string())),
                }
            }
        }
        Ok(tickers)
    }
}

/// Watchlist used when no watchlist file is supplied.
pub fn default_watchlist() -> Vec<Ticker> {
    ["BTC-USD", "ETH-USD", "SOL-USD", "NVDA", "AAPL"]
        .iter()
        .map(|s| Ticker((*s).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn normalizes_to_uppercase() {
        let ticker: Ticker = " btc-usd ".parse().unwrap();
        assert_eq!(ticker.as_str(), "BTC-USD");
        assert_eq!(ticker.to_string(), "BTC-USD");
    }

    #[test]
    fn rejects_empty_and_malformed_symbols() {
        assert!(matches!(
            "".parse::<Ticker>(),
            Err(DashboardError::Format(_))
        ));
        assert!(matches!(
            "BR K.B!".parse::<Ticker>(),
            Err(DashboardError::Format(_))
        ));
    }

    #[test]
    fn accepts_index_and_pair_punctuation() {
        for sym in ["^GSPC", "BRK.B", "BTC-USD", "EURUSD=X"] {
            assert!(sym.parse::<Ticker>().is_ok(), "{sym} should parse");
        }
    }

    #[test]
    fn parses_mixed_separators_from_file() {
        let input = Cursor::new("aapl, msft\nBTC-USD  sol-usd\n\n");
        let tickers = Ticker::parse_from_file(input).unwrap();
        let symbols: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "BTC-USD", "SOL-USD"]);
    }

    #[test]
    fn file_with_bad_symbol_fails_as_a_whole() {
        let input = Cursor::new("aapl\nnot*a*ticker\n");
        let err = Ticker::parse_from_file(input).unwrap_err();
        assert!(matches!(err, DashboardError::ParseWatchlistFile(_)));
    }

    #[test]
    fn default_watchlist_keeps_display_order() {
        let watchlist = default_watchlist();
        let symbols: Vec<&str> = watchlist.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, ["BTC-USD", "ETH-USD", "SOL-USD", "NVDA", "AAPL"]);
    }
}
