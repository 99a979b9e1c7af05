// =============================================================================
// Trailing Range & Percentage Change
// =============================================================================
//
// The 52-week range is the max / min close over the trailing 252 trading
// days. Anything older than the window is ignored.

use serde::{Deserialize, Serialize};

/// Trading days in a year.
pub const YEAR_WINDOW: usize = 252;

/// High / low over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingRange {
    pub high: f64,
    pub low: f64,
}

/// Max / min over the last `window` closes (or all of them if fewer).
///
/// Returns `None` for empty input or `window == 0`.
pub fn trailing_range(closes: &[f64], window: usize) -> Option<TrailingRange> {
    if closes.is_empty() || window == 0 {
        return None;
    }

    let start = closes.len().saturating_sub(window);
    let tail = &closes[start..];

    let (high, low) = tail
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &c| {
            (hi.max(c), lo.min(c))
        });

    if high.is_finite() && low.is_finite() {
        Some(TrailingRange { high, low })
    } else {
        None
    }
}

/// `(current - reference) / reference * 100`.
///
/// Returns `None` when `reference` is zero or the result is non-finite.
pub fn percent_change(reference: f64, current: f64) -> Option<f64> {
    if reference == 0.0 {
        return None;
    }
    let pct = (current - reference) / reference * 100.0;
    pct.is_finite().then_some(pct)
}
