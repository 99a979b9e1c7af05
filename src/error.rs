// =============================================================================
// Error types for the analysis core
// =============================================================================
//
// Two tiers:
//   AnalysisError     — fatal for the symbol being analysed. The caller records
//                       the failure and moves on to the next symbol.
//   TrendOriginError  — non-fatal. `analyze` swallows it and reports the trend
//                       origin as unknown.

use thiserror::Error;

/// Fatal per-symbol analysis failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Undefined metric: {metric}")]
    UndefinedMetric { metric: &'static str },

    #[error("Invalid price at index {index}: {value}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("No price data")]
    NoPriceData,

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Failures of the trend origin lookup. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendOriginError {
    #[error("Moving average series length mismatch: short {short}, long {long}")]
    MismatchedSeries { short: usize, long: usize },

    #[error("Price at trend origin (index {index}) is zero")]
    ZeroOriginPrice { index: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
