// =============================================================================
// SignalGrid — per-symbol SMA crossover analysis engine
// =============================================================================
//
// The analysis core turns a daily close series into a trend state, a
// crossover signal, a momentum score and a handful of derived statistics.
// The remaining modules are the thin layers a caller needs around it:
// ingestion of raw quotes, persistence-ready records, hourly snapshots and a
// concurrent batch runner.
// =============================================================================

pub mod analyzer;
pub mod batch;
pub mod error;
pub mod indicators;
pub mod ingest;
pub mod record;
pub mod runtime_config;
pub mod sectors;
pub mod snapshot;
pub mod trend;
pub mod types;

pub use analyzer::{analyze, Analyzer};
pub use batch::{run_batch, BatchReport, SymbolFailure, SymbolJob};
pub use error::{AnalysisError, TrendOriginError};
pub use indicators::{Momentum, MovingAverageSeries, NeutralReason};
pub use record::{Fundamentals, StockRecord};
pub use runtime_config::{AnalysisParams, EngineConfig};
pub use snapshot::{DashboardPayload, Snapshot};
pub use trend::{CrossoverEvent, TrendOrigin, TrendState};
pub use types::{AnalysisResult, PriceSeries};
