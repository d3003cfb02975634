//!
//! Common types and utilities shared by the dashboard binary and its data feeds.
//!
//! This crate aggregates:
//! - `error` — unified error type `DashboardError` used across the workspace.
//! - `result` — handy `Result<T, DashboardError>` alias.
//! - `tickers` — ticker symbols, watchlist parsing helpers and defaults.
//! - `quote` — quote snapshot model, fetch outcomes and the provider contract.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod tickers;
pub mod quote;

pub use error::DashboardError;
pub use result::Result;
pub use tickers::Ticker;
pub use quote::{FetchResult, PriceSeries, QuoteSnapshot, QuoteSource};
