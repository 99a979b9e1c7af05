// =============================================================================
// Trend State — short vs long SMA ordering
// =============================================================================
//
//   BULLISH  when short > long
//   BEARISH  otherwise (equality and undefined averages included)

use serde::{Deserialize, Serialize};

use crate::indicators::MovingAverageSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendState {
    Bullish,
    Bearish,
}

impl TrendState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
        }
    }
}

impl std::fmt::Display for TrendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A short / long SMA pair observed on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaPair {
    pub short: f64,
    pub long: f64,
}

impl MaPair {
    pub fn new(short: f64, long: f64) -> Self {
        Self { short, long }
    }

    /// Pair at `index`, or `None` if either average is undefined there.
    pub fn at(short: &MovingAverageSeries, long: &MovingAverageSeries, index: usize) -> Option<Self> {
        Some(Self::new(short.at(index)?, long.at(index)?))
    }
}

/// Classify the trend from a defined pair of averages.
pub fn classify_trend(pair: MaPair) -> TrendState {
    if pair.short > pair.long {
        TrendState::Bullish
    } else {
        TrendState::Bearish
    }
}

/// Classify the trend at `index` of a pair of SMA series.
///
/// An undefined average never compares greater, so warm-up indices read as
/// BEARISH.
pub fn trend_at(short: &MovingAverageSeries, long: &MovingAverageSeries, index: usize) -> TrendState {
    match MaPair::at(short, long, index) {
        Some(pair) => classify_trend(pair),
        None => TrendState::Bearish,
    }
}
