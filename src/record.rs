// =============================================================================
// Stock Record — persistence-ready view of an analysis
// =============================================================================
//
// The record is what gets upserted downstream, keyed by ticker. Numeric
// values are stored as fixed 2-decimal strings so every reader sees the same
// rounding regardless of its float handling.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::RawQuotes;
use crate::sectors::{fallback_sector, UNKNOWN_SECTOR};
use crate::types::AnalysisResult;

pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const LIVE_SOURCE: &str = "LIVE_API";

/// Company profile data that accompanies an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub company_name: String,
    pub description: String,
    pub sector: String,
    /// Market capitalisation in billions.
    pub market_cap: Option<f64>,
}

impl Fundamentals {
    /// Defaults used when the profile provider has nothing for `ticker`.
    pub fn fallback(ticker: &str) -> Self {
        Self {
            company_name: ticker.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            sector: fallback_sector(ticker).unwrap_or(UNKNOWN_SECTOR).to_string(),
            market_cap: None,
        }
    }

    /// Fallback values overlaid with whatever the quote payload carries.
    pub fn resolve(ticker: &str, quotes: &RawQuotes) -> Self {
        let mut f = Self::fallback(ticker);
        if let Some(name) = non_empty(&quotes.company_name) {
            f.company_name = name.to_string();
        }
        if let Some(desc) = non_empty(&quotes.description) {
            f.description = desc.to_string();
        }
        if let Some(sector) = non_empty(&quotes.sector) {
            f.sector = sector.to_string();
        }
        if quotes.market_cap.is_some() {
            f.market_cap = quotes.market_cap;
        }
        f
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A single stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub ticker: String,
    pub company_name: String,
    pub description: String,
    pub sector: String,
    pub status: String,
    pub signal: String,
    pub current_price: String,
    pub daily_change: String,
    pub volume: String,
    pub year_high: String,
    pub year_low: String,
    pub rsi: String,
    pub sma_50: String,
    pub sma_200: String,
    pub price_history: Vec<String>,
    pub updated_at: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_return: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_date: Option<String>,
}

impl StockRecord {
    pub fn new(
        result: &AnalysisResult,
        fundamentals: &Fundamentals,
        description_limit: usize,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ticker: result.symbol.clone(),
            company_name: fundamentals.company_name.clone(),
            description: truncate_description(&fundamentals.description, description_limit),
            sector: fundamentals.sector.clone(),
            status: result.trend.to_string(),
            signal: result.signal.to_string(),
            current_price: fixed2(result.current_price),
            daily_change: fixed2(result.daily_change),
            volume: result.volume.to_string(),
            year_high: fixed2(result.year_high),
            year_low: fixed2(result.year_low),
            rsi: fixed2(result.rsi()),
            sma_50: fixed2(result.sma_short),
            sma_200: fixed2(result.sma_long),
            price_history: result.price_history.iter().map(|p| fixed2(*p)).collect(),
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            source: LIVE_SOURCE.to_string(),
            market_cap: fundamentals
                .market_cap
                .filter(|cap| *cap != 0.0)
                .map(fixed2),
            strategy_return: Some(fixed2(result.strategy_return)),
            signal_date: Some(result.trend_age.clone()),
        }
    }
}

/// Fixed 2-decimal rendering.
pub fn fixed2(value: f64) -> String {
    let s = format!("{value:.2}");
    // Avoid "-0.00".
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// Cut descriptions longer than `limit` characters to `limit - 3` plus "...".
pub fn truncate_description(description: &str, limit: usize) -> String {
    if description.chars().count() <= limit {
        return description.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = description.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use chrono::TimeZone;

    fn sample_result() -> AnalysisResult {
        let closes: Vec<f64> = (1..=230).map(|x| x as f64 * 1.005).collect();
        analyze("AAPL", &closes, 1_234_567).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn fixed2_rounding() {
        assert_eq!(fixed2(100.0), "100.00");
        assert_eq!(fixed2(1.005_f64 + 0.001), "1.01");
        assert_eq!(fixed2(-2.345_6), "-2.35");
        assert_eq!(fixed2(-0.001), "0.00");
    }

    #[test]
    fn truncate_long_description() {
        let long = "x".repeat(600);
        let out = truncate_description(&long, 500);
        assert_eq!(out.chars().count(), 500);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_description("short", 500), "short");
    }

    #[test]
    fn fallback_fundamentals() {
        let f = Fundamentals::fallback("JPM");
        assert_eq!(f.company_name, "JPM");
        assert_eq!(f.description, DEFAULT_DESCRIPTION);
        assert_eq!(f.sector, "Financials");
        assert!(f.market_cap.is_none());
        assert_eq!(Fundamentals::fallback("NOPE").sector, "Unknown");
    }

    #[test]
    fn resolve_overlays_present_values() {
        let quotes = RawQuotes {
            company_name: Some("Apple Inc.".to_string()),
            sector: Some(String::new()),
            market_cap: Some(3_400.5),
            ..RawQuotes::default()
        };
        let f = Fundamentals::resolve("AAPL", &quotes);
        assert_eq!(f.company_name, "Apple Inc.");
        assert_eq!(f.sector, "Technology");
        assert_eq!(f.description, DEFAULT_DESCRIPTION);
        assert_eq!(f.market_cap, Some(3_400.5));
    }

    #[test]
    fn record_fields_are_rounded_strings() {
        let result = sample_result();
        let record = StockRecord::new(&result, &Fundamentals::fallback("AAPL"), 500, fixed_time());

        assert_eq!(record.ticker, "AAPL");
        assert_eq!(record.status, "BULLISH");
        assert_eq!(record.signal, "NONE");
        assert_eq!(record.volume, "1234567");
        assert_eq!(record.current_price, "231.15");
        assert_eq!(record.rsi, "50.00");
        assert_eq!(record.price_history.len(), 30);
        assert_eq!(record.price_history.last().unwrap(), "231.15");
        assert_eq!(record.signal_date.as_deref(), Some("31 days ago"));
        assert_eq!(record.updated_at, "2025-03-14T15:09:26Z");
        assert_eq!(record.source, "LIVE_API");
        assert!(record.market_cap.is_none());
    }

    #[test]
    fn zero_market_cap_is_omitted() {
        let result = sample_result();
        let mut f = Fundamentals::fallback("AAPL");
        f.market_cap = Some(0.0);
        let record = StockRecord::new(&result, &f, 500, fixed_time());
        assert!(record.market_cap.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("market_cap").is_none());
        assert_eq!(json["strategy_return"], record.strategy_return.clone().unwrap());
    }
}
