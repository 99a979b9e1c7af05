// =============================================================================
// SignalGrid — Batch Runner
// =============================================================================
//
// Reads the configured symbol universe from a quote book, analyses every
// symbol independently, and writes the rolled dashboard payload.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use signalgrid::ingest::load_quote_book;
use signalgrid::{
    run_batch, Analyzer, AnalysisError, DashboardPayload, EngineConfig, Fundamentals,
    StockRecord, SymbolJob,
};

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = env_path("SIGNALGRID_CONFIG", "engine_config.json");
    let input_path = env_path("SIGNALGRID_INPUT", "quotes.json");
    let output_path = env_path("SIGNALGRID_OUTPUT", "market-data-historical.json");

    let mut config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    if let Ok(syms) = std::env::var("SIGNALGRID_SYMBOLS") {
        config.override_symbols(&syms);
    }

    info!(symbols = config.symbols.len(), "Configured symbol universe");

    let analyzer = Arc::new(Analyzer::new(config.analysis.clone()).context("invalid analysis settings")?);

    // ── 2. Quotes -> jobs ────────────────────────────────────────────────
    let book = load_quote_book(&input_path)?;

    let jobs: Vec<SymbolJob> = config
        .symbols
        .iter()
        .map(|symbol| {
            let series = book
                .get(symbol)
                .ok_or(AnalysisError::NoPriceData)
                .and_then(|quotes| quotes.to_series());
            SymbolJob::new(symbol.clone(), series)
        })
        .collect();

    // ── 3. Fan out ───────────────────────────────────────────────────────
    let report = run_batch(analyzer, jobs).await;

    // ── 4. Records + dashboard payload ───────────────────────────────────
    let now = Utc::now();
    let records: Vec<StockRecord> = report
        .results
        .iter()
        .map(|result| {
            let fundamentals = book
                .get(&result.symbol)
                .map(|quotes| Fundamentals::resolve(&result.symbol, quotes))
                .unwrap_or_else(|| Fundamentals::fallback(&result.symbol));
            StockRecord::new(result, &fundamentals, config.description_limit, now)
        })
        .collect();

    let previous = if output_path.exists() {
        DashboardPayload::load(&output_path)
            .map_err(|e| warn!(error = %e, "Previous payload unreadable, starting fresh"))
            .ok()
    } else {
        None
    };

    let payload = DashboardPayload::roll(previous.as_ref(), records, now, &config);
    payload.save(&output_path)?;

    info!(
        run_id = %report.run_id,
        processed = report.processed,
        failed = report.failed,
        "Run complete"
    );
    Ok(())
}
