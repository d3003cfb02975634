//!
//! Market data feeds for the terminal dashboard.
//!
//! The dashboard binary only depends on the `QuoteSource` contract from
//! `dash_common`; this crate supplies the bundled implementation:
//! - `walk` — random-walk price and volume synthesis.
//! - `synthetic` — `SyntheticFeed`, a stateful in-process feed with seeded
//!   baselines, bounded price history, and optional failure injection.
#![warn(missing_docs)]
pub mod walk;
pub mod synthetic;

pub use synthetic::{ChaosOdds, SyntheticFeed};
