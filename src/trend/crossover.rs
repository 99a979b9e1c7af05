// =============================================================================
// Crossover Detection — Golden / Death cross
// =============================================================================
//
// Latest-day detector (strict on both days):
//   GOLDEN_CROSS  yesterday short < long  AND  today short > long
//   DEATH_CROSS   yesterday short > long  AND  today short < long
//   NONE          otherwise, including an exact tie on either day
//
// The transition history walks the trend state over the full series and
// reports every index where it flips.

use serde::{Deserialize, Serialize};

use super::state::{trend_at, MaPair, TrendState};
use crate::indicators::MovingAverageSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossoverEvent {
    GoldenCross,
    DeathCross,
    None,
}

impl CrossoverEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoldenCross => "GOLDEN_CROSS",
            Self::DeathCross => "DEATH_CROSS",
            Self::None => "NONE",
        }
    }
}

impl std::fmt::Display for CrossoverEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify today's event from today's and yesterday's SMA pairs.
///
/// An undefined `yesterday` (long average still warming up) yields `None`.
pub fn detect_crossover(today: MaPair, yesterday: Option<MaPair>) -> CrossoverEvent {
    let Some(prev) = yesterday else {
        return CrossoverEvent::None;
    };

    if prev.short < prev.long && today.short > today.long {
        CrossoverEvent::GoldenCross
    } else if prev.short > prev.long && today.short < today.long {
        CrossoverEvent::DeathCross
    } else {
        CrossoverEvent::None
    }
}

/// A flip of the trend state at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendTransition {
    pub index: usize,
    pub event: CrossoverEvent,
}

/// Every index at which the trend state differs from the previous index.
///
/// Indices with an undefined average read as BEARISH, so a series whose short
/// average leads from the moment both are defined reports one GOLDEN_CROSS at
/// the first fully-defined index.
pub fn trend_transitions(
    short: &MovingAverageSeries,
    long: &MovingAverageSeries,
) -> Vec<TrendTransition> {
    let len = short.len().min(long.len());
    let mut transitions = Vec::new();
    if len < 2 {
        return transitions;
    }

    let mut prev = trend_at(short, long, 0);
    for index in 1..len {
        let state = trend_at(short, long, index);
        if state != prev {
            let event = match state {
                TrendState::Bullish => CrossoverEvent::GoldenCross,
                TrendState::Bearish => CrossoverEvent::DeathCross,
            };
            transitions.push(TrendTransition { index, event });
        }
        prev = state;
    }

    transitions
}
