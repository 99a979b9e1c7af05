// =============================================================================
// Symbol Analyzer — SMA crossover analysis with momentum confirmation
// =============================================================================
//
// One call = one symbol = one price series in, one AnalysisResult out.
//
//   1. SMA(short) and SMA(long) over the closes
//   2. Momentum score over the trailing `momentum_period` changes
//   3. Trend state from the latest SMA pair
//   4. Crossover event from today's and yesterday's SMA pairs
//   5. Trend origin via the bounded backward scan
//   6. 52-week range, daily change, return since trend origin
//
// Price, SMA and momentum failures abort the symbol. A failed trend origin
// lookup only downgrades the result to an unknown origin.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::indicators::{current_momentum, percent_change, trailing_range, MovingAverageSeries};
use crate::runtime_config::AnalysisParams;
use crate::trend::{
    classify_trend, detect_crossover, locate_trend_origin, return_since_origin, MaPair,
    TrendOrigin,
};
use crate::types::{trend_age_label, AnalysisResult, PriceSeries};

/// Stateless analyzer. Safe to share across threads; every call owns its
/// own input and output.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    params: AnalysisParams,
}

impl Analyzer {
    pub fn new(params: AnalysisParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Analyse one symbol's price series.
    pub fn analyze(&self, symbol: &str, series: &PriceSeries) -> Result<AnalysisResult> {
        let p = &self.params;
        let closes = series.closes();
        let len = closes.len();

        if len < p.long_window {
            debug!(symbol, len, required = p.long_window, "analysis: insufficient data");
            return Err(AnalysisError::InsufficientData {
                required: p.long_window,
                got: len,
            });
        }

        // --- Moving averages ---------------------------------------------------
        let sma_short = MovingAverageSeries::compute(closes, p.short_window);
        let sma_long = MovingAverageSeries::compute(closes, p.long_window);

        let today = MaPair::new(
            finite(sma_short.latest(), "sma_short")?,
            finite(sma_long.latest(), "sma_long")?,
        );
        let yesterday = MaPair::at(&sma_short, &sma_long, len - 2);

        // --- Prices ------------------------------------------------------------
        let current_price = closes[len - 1];
        let prev_close = closes[len - 2];
        let daily_change = percent_change(prev_close, current_price)
            .ok_or(AnalysisError::UndefinedMetric { metric: "daily_change" })?;

        let range = trailing_range(closes, p.range_window)
            .ok_or(AnalysisError::UndefinedMetric { metric: "year_range" })?;

        let momentum = current_momentum(closes, p.momentum_period);

        // --- Trend -------------------------------------------------------------
        let trend = classify_trend(today);
        let signal = detect_crossover(today, yesterday);

        let (trend_origin, strategy_return) =
            locate_trend_origin(&sma_short, &sma_long, trend, p.origin_lookback)
                .and_then(|origin| Ok((origin, return_since_origin(closes, origin)?)))
                .unwrap_or_else(|e| {
                    warn!(symbol, error = %e, "trend origin lookup failed, reporting unknown");
                    (TrendOrigin::Unknown, 0.0)
                });

        debug!(
            symbol,
            %trend,
            %signal,
            rsi = format!("{:.2}", momentum.score()),
            origin = ?trend_origin.relative_offset(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            current_price,
            daily_change,
            volume: series.volume(),
            year_high: range.high,
            year_low: range.low,
            momentum,
            sma_short: today.short,
            sma_long: today.long,
            trend,
            signal,
            trend_origin,
            strategy_return,
            trend_age: trend_age_label(trend_origin),
            price_history: series.tail(p.history_tail).to_vec(),
            analyzed_at: Utc::now(),
        })
    }
}

/// Analyse raw closes with the default windows.
pub fn analyze(symbol: &str, prices: &[f64], volume: u64) -> Result<AnalysisResult> {
    let series = PriceSeries::new(prices.to_vec(), volume)?;
    Analyzer::default().analyze(symbol, &series)
}

fn finite(value: Option<f64>, metric: &'static str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(AnalysisError::UndefinedMetric { metric }),
    }
}
