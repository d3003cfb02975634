//! Random-walk price and volume synthesis.
//!
//! One walk step mimics a plausible tick: the price moves by a factor
//! sampled uniformly from `[-1%, +1%]` and is clamped to a minimum positive
//! value to avoid non-sensical zero/negative prices. Volume is jittered
//! around a per-ticker baseline so liquid names print large figures.

use rand::Rng;

/// Smallest price the walk will ever produce.
const PRICE_FLOOR: f64 = 0.01;
/// Relative half-width of one walk step.
const STEP_SPAN: f64 = 0.01;

/// Calculate the next synthetic price using a small random walk around
/// `current_price`.
///
/// - current_price: last known price for the symbol.
/// - Returns: a new price value for the next tick.
pub fn next_price(current_price: f64) -> f64 {
    let mut rng = rand::rng();
    let change: f64 = rng.random_range(-STEP_SPAN..STEP_SPAN);
    let new_price = current_price * (1.0 + change);
    new_price.max(PRICE_FLOOR)
}

/// Synthesize a traded volume around `base`, jittered upward by up to 25%.
pub fn next_volume(base: u64) -> u64 {
    let mut rng = rand::rng();
    base + rng.random_range(0..=base / 4)
}
