// =============================================================================
// History Snapshots & Dashboard Payload
// =============================================================================
//
// Each run captures a slim hourly snapshot of every stored record (no price
// history) and rolls it into the dashboard payload together with the
// snapshots of the previous `replay_hours` hours.
//
//   snapshot_id = "%Y-%m-%d-%H" of the capture time (UTC)
//   ttl         = capture time + snapshot_ttl_days, unix seconds

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::record::StockRecord;
use crate::runtime_config::{write_atomic, EngineConfig};

const SNAPSHOT_ID_FORMAT: &str = "%Y-%m-%d-%H";

/// One stock inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub ticker: String,
    pub status: String,
    pub sector: String,
    pub sma_200: f64,
    pub sma_50: f64,
    pub signal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl From<&StockRecord> for SnapshotItem {
    fn from(record: &StockRecord) -> Self {
        Self {
            ticker: record.ticker.clone(),
            status: record.status.clone(),
            sector: record.sector.clone(),
            sma_200: record.sma_200.parse().unwrap_or(0.0),
            sma_50: record.sma_50.parse().unwrap_or(0.0),
            signal: record.signal.clone(),
            market_cap: record.market_cap.as_deref().and_then(|c| c.parse().ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snapshot_id: String,
    pub timestamp: String,
    pub stocks: Vec<SnapshotItem>,
    pub ttl: i64,
}

impl Snapshot {
    pub fn capture(records: &[StockRecord], now: DateTime<Utc>, ttl_days: i64) -> Self {
        Self {
            snapshot_id: snapshot_id(now),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            stocks: records.iter().map(SnapshotItem::from).collect(),
            ttl: (now + Duration::days(ttl_days)).timestamp(),
        }
    }
}

/// Hourly slot id for `at`.
pub fn snapshot_id(at: DateTime<Utc>) -> String {
    at.format(SNAPSHOT_ID_FORMAT).to_string()
}

/// Ids of the last `hours` hourly slots, newest (the current hour) first.
pub fn replay_ids(now: DateTime<Utc>, hours: u32) -> Vec<String> {
    (0..hours)
        .map(|h| snapshot_id(now - Duration::hours(i64::from(h))))
        .collect()
}

// =============================================================================
// DashboardPayload
// =============================================================================

/// Everything the dashboard reads in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    #[serde(rename = "stockData")]
    pub stock_data: Vec<StockRecord>,
    #[serde(rename = "historicalSnapshots")]
    pub historical_snapshots: Vec<Snapshot>,
    pub retrieved_at: String,
}

impl DashboardPayload {
    /// Build the next payload from this run's records.
    ///
    /// Records are upserted by ticker into the previous payload's records, so
    /// a symbol that failed this run keeps its last stored record. The result
    /// is sorted by ticker and the fresh snapshot is taken from it.
    ///
    /// The fresh snapshot takes the current hour's slot (replacing any earlier
    /// snapshot with the same id). Previous snapshots are kept only while
    /// their slot is inside the replay window.
    pub fn roll(
        previous: Option<&DashboardPayload>,
        records: Vec<StockRecord>,
        now: DateTime<Utc>,
        config: &EngineConfig,
    ) -> Self {
        let records = upsert(previous.map(|p| p.stock_data.as_slice()), records);
        let fresh = Snapshot::capture(&records, now, config.snapshot_ttl_days);

        let mut historical_snapshots = Vec::new();
        for id in replay_ids(now, config.replay_hours) {
            if id == fresh.snapshot_id {
                historical_snapshots.push(fresh.clone());
            } else if let Some(old) = previous
                .and_then(|p| p.historical_snapshots.iter().find(|s| s.snapshot_id == id))
            {
                historical_snapshots.push(old.clone());
            }
        }

        debug!(
            snapshot_id = %fresh.snapshot_id,
            replayed = historical_snapshots.len(),
            "dashboard payload rolled"
        );

        Self {
            stock_data: records,
            historical_snapshots,
            retrieved_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard payload from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse dashboard payload from {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string(self).context("failed to serialise dashboard payload")?;
        write_atomic(path, &content)?;
        info!(
            path = %path.display(),
            stocks = self.stock_data.len(),
            snapshots = self.historical_snapshots.len(),
            "dashboard payload saved"
        );
        Ok(())
    }
}

/// Merge `fresh` over `stored` keyed by ticker, fresh records winning.
fn upsert(stored: Option<&[StockRecord]>, fresh: Vec<StockRecord>) -> Vec<StockRecord> {
    let mut by_ticker: BTreeMap<String, StockRecord> = stored
        .unwrap_or_default()
        .iter()
        .map(|r| (r.ticker.clone(), r.clone()))
        .collect();
    for record in fresh {
        by_ticker.insert(record.ticker.clone(), record);
    }
    by_ticker.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::record::Fundamentals;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 30, 0).unwrap()
    }

    fn records(now: DateTime<Utc>) -> Vec<StockRecord> {
        let closes: Vec<f64> = (1..=260).map(|x| x as f64).collect();
        ["AAPL", "XOM"]
            .iter()
            .map(|t| {
                let result = analyze(t, &closes, 100).unwrap();
                let mut f = Fundamentals::fallback(t);
                f.market_cap = Some(250.0);
                StockRecord::new(&result, &f, 500, now)
            })
            .collect()
    }

    #[test]
    fn snapshot_ids_are_hourly() {
        assert_eq!(snapshot_id(at(3, 7)), "2025-06-03-07");
        let ids = replay_ids(at(3, 1), 3);
        assert_eq!(ids, vec!["2025-06-03-01", "2025-06-03-00", "2025-06-02-23"]);
    }

    #[test]
    fn capture_builds_slim_items() {
        let now = at(3, 7);
        let snap = Snapshot::capture(&records(now), now, 30);
        assert_eq!(snap.snapshot_id, "2025-06-03-07");
        assert_eq!(snap.stocks.len(), 2);
        assert_eq!(snap.stocks[0].ticker, "AAPL");
        assert_eq!(snap.stocks[0].status, "BULLISH");
        assert_eq!(snap.stocks[0].sector, "Technology");
        assert_eq!(snap.stocks[1].sector, "Energy");
        assert_eq!(snap.stocks[0].market_cap, Some(250.0));
        // SMA50 of 211..=260 is 235.5.
        assert!((snap.stocks[0].sma_50 - 235.5).abs() < 1e-10);
        assert_eq!(snap.ttl - now.timestamp(), 30 * 24 * 3600);
    }

    #[test]
    fn roll_keeps_window_and_replaces_current_hour() {
        let config = EngineConfig::default();

        let t0 = at(3, 7);
        let first = DashboardPayload::roll(None, records(t0), t0, &config);
        assert_eq!(first.historical_snapshots.len(), 1);

        // Same hour again: replaced, not duplicated.
        let t0b = t0 + Duration::minutes(10);
        let second = DashboardPayload::roll(Some(&first), records(t0b), t0b, &config);
        assert_eq!(second.historical_snapshots.len(), 1);
        assert_eq!(second.historical_snapshots[0].timestamp, "2025-06-03T07:40:00Z");

        // Next hour: previous slot replayed behind the fresh one.
        let t1 = t0 + Duration::hours(1);
        let third = DashboardPayload::roll(Some(&second), records(t1), t1, &config);
        let ids: Vec<&str> = third
            .historical_snapshots
            .iter()
            .map(|s| s.snapshot_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2025-06-03-08", "2025-06-03-07"]);

        // A day later the old slots fall out of the 24h window.
        let t2 = t1 + Duration::hours(24);
        let fourth = DashboardPayload::roll(Some(&third), records(t2), t2, &config);
        assert_eq!(fourth.historical_snapshots.len(), 1);
        assert_eq!(fourth.historical_snapshots[0].snapshot_id, "2025-06-04-08");
    }

    #[test]
    fn roll_keeps_records_of_symbols_missing_from_this_run() {
        let config = EngineConfig::default();
        let t0 = at(3, 7);
        let first = DashboardPayload::roll(None, records(t0), t0, &config);

        // Second run: only AAPL succeeded.
        let t1 = t0 + Duration::hours(1);
        let mut fresh = records(t1);
        fresh.retain(|r| r.ticker == "AAPL");
        let second = DashboardPayload::roll(Some(&first), fresh, t1, &config);

        let tickers: Vec<&str> = second.stock_data.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "XOM"]);
        assert_eq!(second.stock_data[0].updated_at, records(t1)[0].updated_at);
        assert_eq!(second.stock_data[1], first.stock_data[1]);

        // The fresh snapshot covers the merged set.
        let snap = &second.historical_snapshots[0];
        assert_eq!(snap.snapshot_id, "2025-06-03-08");
        let snap_tickers: Vec<&str> = snap.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(snap_tickers, vec!["AAPL", "XOM"]);
    }

    #[test]
    fn upsert_sorts_by_ticker_and_prefers_fresh() {
        let t0 = at(3, 7);
        let t1 = at(3, 9);
        let mut stored = records(t0);
        stored.reverse();
        let fresh: Vec<StockRecord> = records(t1).into_iter().filter(|r| r.ticker == "XOM").collect();

        let merged = upsert(Some(stored.as_slice()), fresh.clone());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].ticker, "AAPL");
        assert_eq!(merged[1], fresh[0]);

        assert_eq!(upsert(None, Vec::new()), Vec::<StockRecord>::new());
    }

    #[test]
    fn payload_uses_dashboard_field_names() {
        let now = at(3, 7);
        let payload = DashboardPayload::roll(None, records(now), now, &EngineConfig::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("stockData").is_some());
        assert!(json.get("historicalSnapshots").is_some());
        assert_eq!(json["retrieved_at"], "2025-06-03T07:30:00Z");
    }

    #[test]
    fn save_then_load() {
        let now = at(3, 7);
        let payload = DashboardPayload::roll(None, records(now), now, &EngineConfig::default());
        let path = std::env::temp_dir().join(format!("signalgrid-payload-{}.json", uuid::Uuid::new_v4()));
        payload.save(&path).unwrap();
        let loaded = DashboardPayload::load(&path).unwrap();
        assert_eq!(loaded, payload);
        std::fs::remove_file(&path).unwrap();
    }
}
