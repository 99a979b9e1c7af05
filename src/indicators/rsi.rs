// =============================================================================
// Momentum Score — RSI over simple trailing means
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Over the trailing `period` deltas, take the simple mean of the gains
//          and the simple mean of the loss magnitudes. A sliding accumulator
//          keeps the sums current as the window moves.
// Step 3 — RS    = avg_gain / avg_loss
//          score = 100 - 100 / (1 + RS)
//
// This is not Wilder's smoothing. When the average loss is zero, or when
// fewer than `period` deltas exist, the score is pinned to a neutral 50.0
// instead of running off towards 100.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Score reported whenever the oscillator cannot be measured.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Why a momentum reading fell back to [`NEUTRAL_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeutralReason {
    /// Fewer than `period` day-over-day changes were available.
    InsufficientHistory,
    /// The trailing average loss was zero, so RS is undefined.
    NoLosses,
}

/// A momentum reading in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Momentum {
    Measured(f64),
    Neutral(NeutralReason),
}

impl Momentum {
    pub fn score(&self) -> f64 {
        match self {
            Self::Measured(score) => *score,
            Self::Neutral(_) => NEUTRAL_SCORE,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral(_))
    }
}

/// Compute the momentum reading for every close.
///
/// Index `i` reflects the `period` deltas ending at close `i`. Entries without
/// `period` prior deltas are `Neutral(InsufficientHistory)`.
pub fn calculate_momentum(closes: &[f64], period: usize) -> Vec<Momentum> {
    let mut result = vec![Momentum::Neutral(NeutralReason::InsufficientHistory); closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;
    let mut sum_gain = 0.0_f64;
    let mut sum_loss = 0.0_f64;

    for (j, &delta) in deltas.iter().enumerate() {
        let (gain, loss) = split_delta(delta);
        sum_gain += gain;
        sum_loss += loss;

        if j >= period {
            let (old_gain, old_loss) = split_delta(deltas[j - period]);
            sum_gain -= old_gain;
            sum_loss -= old_loss;
        }

        if j + 1 >= period {
            // Running sums can drift a hair below zero after subtraction.
            let avg_gain = sum_gain.max(0.0) / period_f;
            let avg_loss = sum_loss.max(0.0) / period_f;
            result[j + 1] = momentum_from_averages(avg_gain, avg_loss);
        }
    }

    result
}

/// Momentum reading at the most recent close.
pub fn current_momentum(closes: &[f64], period: usize) -> Momentum {
    if period == 0 || closes.len() < period + 1 {
        trace!(len = closes.len(), period, "momentum: insufficient history");
        return Momentum::Neutral(NeutralReason::InsufficientHistory);
    }

    // Only the trailing window matters for the latest reading.
    let tail = &closes[closes.len() - (period + 1)..];
    calculate_momentum(tail, period)
        .last()
        .copied()
        .unwrap_or(Momentum::Neutral(NeutralReason::InsufficientHistory))
}

// =============================================================================
// Internal helpers
// =============================================================================

fn split_delta(delta: f64) -> (f64, f64) {
    if delta > 0.0 {
        (delta, 0.0)
    } else {
        (0.0, -delta)
    }
}

fn momentum_from_averages(avg_gain: f64, avg_loss: f64) -> Momentum {
    if avg_loss == 0.0 {
        return Momentum::Neutral(NeutralReason::NoLosses);
    }

    let rs = avg_gain / avg_loss;
    let score = 100.0 - 100.0 / (1.0 + rs);

    if score.is_finite() {
        Momentum::Measured(score.clamp(0.0, 100.0))
    } else {
        Momentum::Neutral(NeutralReason::NoLosses)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn momentum_empty_input() {
        assert!(calculate_momentum(&[], 14).is_empty());
        assert_eq!(
            current_momentum(&[], 14),
            Momentum::Neutral(NeutralReason::InsufficientHistory)
        );
    }

    #[test]
    fn momentum_period_zero() {
        let m = current_momentum(&[1.0, 2.0, 3.0], 0);
        assert_eq!(m.score(), NEUTRAL_SCORE);
    }

    #[test]
    fn momentum_insufficient_history() {
        // 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        let m = current_momentum(&closes, 14);
        assert_eq!(m, Momentum::Neutral(NeutralReason::InsufficientHistory));
        assert_eq!(m.score(), 50.0);
    }

    #[test]
    fn momentum_all_gains_is_neutral() {
        // No losses => RS undefined => pinned to 50, not 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let m = current_momentum(&closes, 14);
        assert_eq!(m, Momentum::Neutral(NeutralReason::NoLosses));
        assert_eq!(m.score(), 50.0);
    }

    #[test]
    fn momentum_flat_market_is_neutral() {
        let closes = vec![100.0; 30];
        assert_eq!(current_momentum(&closes, 14).score(), 50.0);
    }

    #[test]
    fn momentum_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let m = current_momentum(&closes, 14);
        assert!(!m.is_neutral());
        assert!(m.score().abs() < 1e-10, "expected 0.0, got {}", m.score());
    }

    #[test]
    fn momentum_known_value() {
        // Alternating +2 / -1 over an even window: avg_gain = 1.0, avg_loss = 0.5.
        // RS = 2 => score = 100 - 100/3.
        let mut closes = vec![100.0];
        for i in 0..20 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let m = current_momentum(&closes, 14);
        let expected = 100.0 - 100.0 / 3.0;
        assert!((m.score() - expected).abs() < 1e-9, "got {}", m.score());
    }

    #[test]
    fn momentum_series_matches_latest() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = calculate_momentum(&closes, 14);
        let latest = current_momentum(&closes, 14);
        assert!((series.last().unwrap().score() - latest.score()).abs() < 1e-9);
    }

    #[test]
    fn momentum_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for m in calculate_momentum(&closes, 14) {
            let v = m.score();
            assert!((0.0..=100.0).contains(&v), "score {v} out of range");
        }
    }
}
