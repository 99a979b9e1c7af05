// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Trailing arithmetic mean over a fixed window:
//   SMA_i = (x_{i-w+1} + ... + x_i) / w
//
// The output is aligned with the input: index `i` holds the mean of the window
// ending at `i`, or `None` while fewer than `w` values have been seen.
// A compensated (Neumaier) running sum keeps the whole series O(n) without
// letting rounding residue from values that left the window build up. A window
// of identical closes yields that close exactly.
// =============================================================================

use serde::{Deserialize, Serialize};

/// An SMA series aligned index-for-index with the closes it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    window: usize,
    values: Vec<Option<f64>>,
}

impl MovingAverageSeries {
    /// Compute the SMA of `closes` over `window`.
    pub fn compute(closes: &[f64], window: usize) -> Self {
        Self {
            window,
            values: calculate_sma(closes, window),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` when out of bounds or still warming up.
    pub fn at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the most recent index.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

/// Compute the SMA series for `closes` and `window`.
///
/// # Edge cases
/// - `window == 0` => every entry is `None`
/// - `closes.len() < window` => every entry is `None`
pub fn calculate_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return result;
    }

    let window_f = window as f64;
    let mut sum = CompensatedSum::default();
    // Length of the trailing run of bit-identical closes.
    let mut run = 0_usize;

    for (i, &close) in closes.iter().enumerate() {
        sum.add(close);
        if i >= window {
            sum.add(-closes[i - window]);
        }

        run = match i.checked_sub(1) {
            Some(prev) if closes[prev].to_bits() == close.to_bits() => run + 1,
            _ => 1,
        };

        if i + 1 >= window {
            result[i] = Some(if run >= window {
                close
            } else {
                sum.value() / window_f
            });
        }
    }

    result
}

/// Neumaier summation: the low-order bits lost by each addition are kept in
/// `compensation` and folded back in on read.
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}
