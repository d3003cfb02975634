//! Static portfolio holdings.
//!
//! The dashboard never computes positions; holdings are display data
//! supplied by the caller, either the built-in defaults or a JSON file
//! passed on the command line:
//!
//! ```json
//! [{ "asset": "BTC", "value": 120917.0, "weight_pct": 45.0 }]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dash_common::Result;
use serde::{Deserialize, Serialize};

/// One static portfolio row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset label, e.g. `BTC`.
    pub asset: String,
    /// Position value in dollars.
    pub value: f64,
    /// Share of the portfolio in percent.
    pub weight_pct: f64,
}

/// Read holdings from a JSON array file.
pub fn load_from_file(path: &Path) -> Result<Vec<Holding>> {
    let file = File::open(path)?;
    let holdings = serde_json::from_reader(BufReader::new(file))?;
    Ok(holdings)
}

/// Built-in holdings used when no holdings file is supplied.
pub fn default_holdings() -> Vec<Holding> {
    vec![
        holding("BTC", 120_917.0, 45.0),
        holding("ETH", 29_376.0, 11.0),
        holding("SOL", 21_349.0, 8.0),
        holding("NVDA", 22_311.0, 8.0),
        holding("USDC", 58_000.0, 21.0),
    ]
}

/// Sum of all position values, shown as the TOTAL row.
pub fn total_value(holdings: &[Holding]) -> f64 {
    holdings.iter().map(|h| h.value).sum()
}

fn holding(asset: &str, value: f64, weight_pct: f64) -> Holding {
    Holding {
        asset: asset.to_string(),
        value,
        weight_pct,
    }
}
