// =============================================================================
// Trend Module
// =============================================================================
//
// Everything derived from the short / long SMA pair:
// - Trend state (bullish / bearish) at a single index
// - Golden / death cross detection and full-history transitions
// - Bounded search for the day the current trend began

pub mod crossover;
pub mod origin;
pub mod state;

pub use crossover::{detect_crossover, trend_transitions, CrossoverEvent, TrendTransition};
pub use origin::{locate_trend_origin, return_since_origin, TrendOrigin, ORIGIN_LOOKBACK};
pub use state::{classify_trend, trend_at, MaPair, TrendState};
