// =============================================================================
// Trend Origin — bounded backward scan
// =============================================================================
//
// Walk back from the latest index through the SMA history and find the first
// day whose trend state differs from the current one. The trend began the
// day after that boundary.
//
//   for offset in 2..lookback:
//       if offset >= len: stop
//       if state(len - offset) != current:
//           origin = len - offset + 1, days_ago = offset - 1
//
// The scan never looks past `lookback` offsets, so its cost does not grow
// with the history. A trend older than the window reports Unknown.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::state::{trend_at, TrendState};
use crate::error::TrendOriginError;
use crate::indicators::{percent_change, MovingAverageSeries};

/// Backward scan ceiling in trading days.
pub const ORIGIN_LOOKBACK: usize = 250;

/// First offset examined. Offset 1 is the latest day itself.
const FIRST_OFFSET: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendOrigin {
    /// The current trend began `days_ago` trading days before the latest
    /// close, at absolute `index` of the series.
    Known { days_ago: usize, index: usize },
    /// No state change inside the lookback window.
    Unknown,
}

impl TrendOrigin {
    /// Offset relative to the latest index (always negative when known).
    pub fn relative_offset(&self) -> Option<isize> {
        match self {
            Self::Known { days_ago, .. } => Some(-(*days_ago as isize)),
            Self::Unknown => None,
        }
    }

    pub fn days_ago(&self) -> Option<usize> {
        match self {
            Self::Known { days_ago, .. } => Some(*days_ago),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// Locate the start of the `current` trend within `lookback` offsets.
pub fn locate_trend_origin(
    short: &MovingAverageSeries,
    long: &MovingAverageSeries,
    current: TrendState,
    lookback: usize,
) -> Result<TrendOrigin, TrendOriginError> {
    if short.len() != long.len() {
        return Err(TrendOriginError::MismatchedSeries {
            short: short.len(),
            long: long.len(),
        });
    }

    let len = short.len();
    for offset in FIRST_OFFSET..lookback {
        if offset >= len {
            break;
        }
        let index = len - offset;
        if trend_at(short, long, index) != current {
            trace!(offset, index, %current, "trend origin boundary found");
            return Ok(TrendOrigin::Known {
                days_ago: offset - 1,
                index: index + 1,
            });
        }
    }

    trace!(len, lookback, %current, "no trend boundary inside lookback");
    Ok(TrendOrigin::Unknown)
}

/// Percentage return from the close at `origin` to the latest close.
///
/// Unknown origins return 0.0.
pub fn return_since_origin(closes: &[f64], origin: TrendOrigin) -> Result<f64, TrendOriginError> {
    let TrendOrigin::Known { index, .. } = origin else {
        return Ok(0.0);
    };

    let (Some(&start), Some(&current)) = (closes.get(index), closes.last()) else {
        return Ok(0.0);
    };

    percent_change(start, current).ok_or(TrendOriginError::ZeroOriginPrice { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smas(closes: &[f64]) -> (MovingAverageSeries, MovingAverageSeries) {
        (
            MovingAverageSeries::compute(closes, 50),
            MovingAverageSeries::compute(closes, 200),
        )
    }

    /// Falling for `fall` days then rising for `rise` days.
    fn v_shape(fall: usize, rise: usize) -> Vec<f64> {
        let mut closes: Vec<f64> = (0..fall).map(|i| 1000.0 - i as f64).collect();
        let bottom = *closes.last().unwrap();
        closes.extend((1..=rise).map(|i| bottom + 3.0 * i as f64));
        closes
    }

    #[test]
    fn constant_series_reports_unknown() {
        let closes = vec![100.0; 600];
        let (short, long) = smas(&closes);
        let origin = locate_trend_origin(&short, &long, TrendState::Bearish, ORIGIN_LOOKBACK).unwrap();
        assert_eq!(origin, TrendOrigin::Unknown);
        assert_eq!(origin.relative_offset(), None);
    }

    #[test]
    fn long_rally_beyond_lookback_is_unknown() {
        // Bullish from index 199 onward, 400 bullish days > 250 lookback.
        let closes: Vec<f64> = (1..=600).map(|x| x as f64).collect();
        let (short, long) = smas(&closes);
        let origin = locate_trend_origin(&short, &long, TrendState::Bullish, ORIGIN_LOOKBACK).unwrap();
        assert_eq!(origin, TrendOrigin::Unknown);
    }

    #[test]
    fn warm_up_counts_as_bearish_boundary() {
        // 230 rising closes: bullish from index 199, warm-up before reads bearish.
        let closes: Vec<f64> = (1..=230).map(|x| x as f64).collect();
        let (short, long) = smas(&closes);
        let origin = locate_trend_origin(&short, &long, TrendState::Bullish, ORIGIN_LOOKBACK).unwrap();
        assert_eq!(origin, TrendOrigin::Known { days_ago: 31, index: 199 });
        assert_eq!(origin.relative_offset(), Some(-31));
    }

    #[test]
    fn finds_recent_golden_cross() {
        let closes = v_shape(400, 120);
        let (short, long) = smas(&closes);
        let len = closes.len();
        let current = trend_at(&short, &long, len - 1);
        assert_eq!(current, TrendState::Bullish);

        let origin = locate_trend_origin(&short, &long, current, ORIGIN_LOOKBACK).unwrap();
        let TrendOrigin::Known { days_ago, index } = origin else {
            panic!("expected a known origin, got {origin:?}");
        };
        assert_eq!(index, len - days_ago);
        assert_eq!(trend_at(&short, &long, index), TrendState::Bullish);
        assert_eq!(trend_at(&short, &long, index - 1), TrendState::Bearish);
        for i in index..len {
            assert_eq!(trend_at(&short, &long, i), TrendState::Bullish);
        }
    }

    #[test]
    fn lookback_ceiling_bounds_the_scan() {
        let closes: Vec<f64> = (1..=230).map(|x| x as f64).collect();
        let (short, long) = smas(&closes);
        // Boundary sits at offset 32; a ceiling of 32 stops just short of it.
        let origin = locate_trend_origin(&short, &long, TrendState::Bullish, 32).unwrap();
        assert_eq!(origin, TrendOrigin::Unknown);
        let origin = locate_trend_origin(&short, &long, TrendState::Bullish, 33).unwrap();
        assert!(origin.is_known());
    }

    #[test]
    fn yesterday_flip_is_one_day_ago() {
        let closes: Vec<f64> = (1..=200).map(|x| x as f64).collect();
        let (short, long) = smas(&closes);
        let origin = locate_trend_origin(&short, &long, TrendState::Bullish, ORIGIN_LOOKBACK).unwrap();
        assert_eq!(origin, TrendOrigin::Known { days_ago: 1, index: 199 });
    }

    #[test]
    fn mismatched_series_is_an_error() {
        let short = MovingAverageSeries::compute(&[1.0, 2.0, 3.0], 1);
        let long = MovingAverageSeries::compute(&[1.0, 2.0], 1);
        let err = locate_trend_origin(&short, &long, TrendState::Bearish, ORIGIN_LOOKBACK).unwrap_err();
        assert_eq!(err, TrendOriginError::MismatchedSeries { short: 3, long: 2 });
    }

    #[test]
    fn return_since_known_origin() {
        let closes = vec![50.0, 100.0, 120.0];
        let origin = TrendOrigin::Known { days_ago: 1, index: 1 };
        let ret = return_since_origin(&closes, origin).unwrap();
        assert!((ret - 20.0).abs() < 1e-10);
    }

    #[test]
    fn return_since_unknown_origin_is_zero() {
        assert_eq!(return_since_origin(&[1.0, 2.0], TrendOrigin::Unknown).unwrap(), 0.0);
    }

    #[test]
    fn zero_origin_price_is_an_error() {
        let closes = vec![1.0, 0.0, 5.0];
        let origin = TrendOrigin::Known { days_ago: 1, index: 1 };
        let err = return_since_origin(&closes, origin).unwrap_err();
        assert_eq!(err, TrendOriginError::ZeroOriginPrice { index: 1 });
    }
}
