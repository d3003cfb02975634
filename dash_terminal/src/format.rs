//! Display formatting for table fields.
//!
//! Missing optional fields always render as [`PLACEHOLDER`], while a true
//! zero change renders as `+0.00%`, so the two cases stay distinguishable
//! on screen. Dollar amounts get thousands grouping; raw volume counts do
//! not, they get magnitude suffixes instead.

use dash_common::QuoteSnapshot;

/// Rendered in place of any missing optional field.
pub const PLACEHOLDER: &str = "-";

/// Arrow shown next to non-negative changes.
const ARROW_UP: char = '▲';
/// Arrow shown next to negative changes.
const ARROW_DOWN: char = '▼';

/// Dollar price with thousands grouping and cents, e.g. `$67,234.50`.
pub fn price(value: f64) -> String {
    format!("${}", group_thousands(&format!("{value:.2}")))
}

/// Whole-dollar amount with thousands grouping, e.g. `$120,917`.
pub fn dollars(value: f64) -> String {
    format!("${}", group_thousands(&format!("{value:.0}")))
}

/// Optional price; [`PLACEHOLDER`] when absent.
pub fn opt_price(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), price)
}

/// Signed percent change with a direction arrow, e.g. `▲+2.34%`.
pub fn change(pct: f64) -> String {
    let arrow = if pct >= 0.0 { ARROW_UP } else { ARROW_DOWN };
    format!("{arrow}{pct:+.2}%")
}

/// Change column for a snapshot; [`PLACEHOLDER`] without a change basis.
pub fn snapshot_change(snapshot: &QuoteSnapshot) -> String {
    if snapshot.has_change_basis() {
        change(snapshot.percent_change())
    } else {
        PLACEHOLDER.to_string()
    }
}

/// Volume with magnitude suffixing: billions as `B`, millions as `M`,
/// smaller counts raw.
pub fn volume(vol: u64) -> String {
    if vol >= 1_000_000_000 {
        format!("{:.2}B", vol as f64 / 1_000_000_000.0)
    } else if vol >= 1_000_000 {
        format!("{:.2}M", vol as f64 / 1_000_000.0)
    } else {
        vol.to_string()
    }
}

/// Optional volume; [`PLACEHOLDER`] when absent.
pub fn opt_volume(vol: Option<u64>) -> String {
    vol.map_or_else(|| PLACEHOLDER.to_string(), volume)
}

/// Portfolio weight, e.g. `45%`.
pub fn weight(pct: f64) -> String {
    format!("{pct:.0}%")
}

/// Insert `,` separators into the integer part of an already formatted
/// decimal string.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
