// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// analyser. Warm-up periods surface as `None` (or an explicit neutral
// reading) so callers are forced to handle insufficient data.

pub mod range;
pub mod rsi;
pub mod sma;

pub use range::{percent_change, trailing_range, TrailingRange, YEAR_WINDOW};
pub use rsi::{calculate_momentum, current_momentum, Momentum, NeutralReason, NEUTRAL_SCORE};
pub use sma::{calculate_sma, MovingAverageSeries};
