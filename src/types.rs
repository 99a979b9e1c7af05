// =============================================================================
// Shared types used across the analysis engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::indicators::Momentum;
use crate::trend::{CrossoverEvent, TrendOrigin, TrendState};

/// Label used when the trend origin lies outside the lookback window.
pub const UNKNOWN_AGE: &str = "Unknown";

// =============================================================================
// PriceSeries
// =============================================================================

/// Daily closes for one symbol (oldest first) plus the trailing volume.
///
/// Every close is finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
    volume: u64,
}

impl PriceSeries {
    pub fn new(closes: Vec<f64>, volume: u64) -> Result<Self> {
        if let Some((index, &value)) = closes
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(AnalysisError::InvalidPrice { index, value });
        }
        Ok(Self { closes, volume })
    }

    /// Build a series from raw quote columns.
    ///
    /// Only positions where both the close and the volume are present are
    /// kept. The trailing volume is the one paired with the last kept close.
    pub fn from_quotes(closes: &[Option<f64>], volumes: &[Option<u64>]) -> Result<Self> {
        let mut clean = Vec::with_capacity(closes.len());
        let mut volume = 0;

        for (close, vol) in closes.iter().zip(volumes.iter()) {
            if let (Some(c), Some(v)) = (close, vol) {
                clean.push(*c);
                volume = *v;
            }
        }

        if clean.is_empty() {
            return Err(AnalysisError::NoPriceData);
        }
        Self::new(clean, volume)
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// The last `n` closes (all of them if fewer).
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.closes[self.closes.len().saturating_sub(n)..]
    }
}

// =============================================================================
// AnalysisResult
// =============================================================================

/// The complete analysis of one symbol. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub current_price: f64,
    /// Percentage change against the previous close.
    pub daily_change: f64,
    pub volume: u64,
    pub year_high: f64,
    pub year_low: f64,
    pub momentum: Momentum,
    pub sma_short: f64,
    pub sma_long: f64,
    pub trend: TrendState,
    pub signal: CrossoverEvent,
    pub trend_origin: TrendOrigin,
    /// Percentage return since the trend origin; 0.0 when unknown.
    pub strategy_return: f64,
    /// "N days ago" or "Unknown".
    pub trend_age: String,
    /// Tail of the input closes for charting.
    pub price_history: Vec<f64>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Momentum score in [0, 100].
    pub fn rsi(&self) -> f64 {
        self.momentum.score()
    }
}

// `analyzed_at` is wall-clock and excluded from equality.
impl PartialEq for AnalysisResult {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.current_price == other.current_price
            && self.daily_change == other.daily_change
            && self.volume == other.volume
            && self.year_high == other.year_high
            && self.year_low == other.year_low
            && self.momentum == other.momentum
            && self.sma_short == other.sma_short
            && self.sma_long == other.sma_long
            && self.trend == other.trend
            && self.signal == other.signal
            && self.trend_origin == other.trend_origin
            && self.strategy_return == other.strategy_return
            && self.trend_age == other.trend_age
            && self.price_history == other.price_history
    }
}

/// Human-readable age of a trend.
pub fn trend_age_label(origin: TrendOrigin) -> String {
    match origin.days_ago() {
        Some(days) => format!("{days} days ago"),
        None => UNKNOWN_AGE.to_string(),
    }
}
