// =============================================================================
// Batch Fan-out — independent per-symbol analysis
// =============================================================================
//
// Every symbol runs on its own blocking task. Tasks share nothing but the
// immutable analyzer, so no locking or ordering is needed between them.
// A failure (or panic) in one task is recorded against that symbol and never
// stops the others.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::{Id, JoinSet};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::Analyzer;
use crate::error::Result;
use crate::types::{AnalysisResult, PriceSeries};

/// One unit of work.
#[derive(Debug, Clone)]
pub struct SymbolJob {
    pub symbol: String,
    /// `Err` when ingestion already failed for this symbol.
    pub series: Result<PriceSeries>,
}

impl SymbolJob {
    pub fn new(symbol: impl Into<String>, series: Result<PriceSeries>) -> Self {
        Self {
            symbol: symbol.into(),
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub processed: usize,
    pub failed: usize,
    /// Successful analyses, sorted by symbol.
    pub results: Vec<AnalysisResult>,
    /// Failures, sorted by symbol.
    pub failures: Vec<SymbolFailure>,
}

/// Analyse every job concurrently and collect a report.
pub async fn run_batch(analyzer: Arc<Analyzer>, jobs: Vec<SymbolJob>) -> BatchReport {
    let run_id = Uuid::new_v4();
    let total = jobs.len();
    info!(%run_id, symbols = total, "batch started");

    let mut set = JoinSet::new();
    let mut symbols = HashMap::with_capacity(total);
    for job in jobs {
        let analyzer = Arc::clone(&analyzer);
        let symbol = job.symbol.clone();
        let handle = set.spawn_blocking(move || {
            job.series
                .and_then(|series| analyzer.analyze(&job.symbol, &series))
        });
        symbols.insert(handle.id(), symbol);
    }

    let (mut results, mut failures) = collect(run_id, set, symbols).await;

    results.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let report = BatchReport {
        run_id,
        processed: results.len(),
        failed: failures.len(),
        results,
        failures,
    };

    info!(
        %run_id,
        processed = report.processed,
        failed = report.failed,
        "batch finished"
    );

    report
}

/// Drain `set`, naming every outcome by the symbol its task was spawned for.
async fn collect(
    run_id: Uuid,
    mut set: JoinSet<Result<AnalysisResult>>,
    mut symbols: HashMap<Id, String>,
) -> (Vec<AnalysisResult>, Vec<SymbolFailure>) {
    let mut results = Vec::with_capacity(symbols.len());
    let mut failures = Vec::new();

    while let Some(joined) = set.join_next_with_id().await {
        let (id, outcome) = match joined {
            Ok((id, outcome)) => (id, outcome.map_err(|e| e.to_string())),
            Err(e) => (e.id(), Err(format!("analysis task aborted: {e}"))),
        };
        let symbol = symbols.remove(&id).unwrap_or_default();

        match outcome {
            Ok(result) => results.push(result),
            Err(reason) => {
                warn!(%run_id, symbol = %symbol, error = %reason, "analysis failed");
                failures.push(SymbolFailure { symbol, reason });
            }
        }
    }

    (results, failures)
}
