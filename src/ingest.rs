// =============================================================================
// Quote Ingestion — raw provider payload to PriceSeries
// =============================================================================
//
// The quote provider returns parallel close / volume columns with gaps
// (`null`) on halted or missing days. Gaps are dropped pairwise before the
// series reaches the analyzer.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::types::PriceSeries;

/// Raw per-symbol payload as delivered by the ingestor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuotes {
    #[serde(default)]
    pub closes: Vec<Option<f64>>,
    #[serde(default)]
    pub volumes: Vec<Option<u64>>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

impl RawQuotes {
    pub fn to_series(&self) -> Result<PriceSeries> {
        PriceSeries::from_quotes(&self.closes, &self.volumes)
    }
}

/// Raw payloads keyed by symbol.
pub type QuoteBook = BTreeMap<String, RawQuotes>;

/// Read a quote book from a JSON file.
pub fn load_quote_book(path: impl AsRef<Path>) -> anyhow::Result<QuoteBook> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quotes from {}", path.display()))?;

    let book: QuoteBook = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quotes from {}", path.display()))?;

    info!(path = %path.display(), symbols = book.len(), "quote book loaded");
    Ok(book)
}
