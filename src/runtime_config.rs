// =============================================================================
// Runtime Configuration — Engine settings with atomic save
// =============================================================================
//
// Every tunable lives here: indicator windows, the trend origin lookback, the
// symbol universe and the snapshot retention settings.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AnalysisError;
use crate::sectors::default_universe;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_short_window() -> usize {
    50
}

fn default_long_window() -> usize {
    200
}

fn default_momentum_period() -> usize {
    14
}

fn default_origin_lookback() -> usize {
    250
}

fn default_range_window() -> usize {
    252
}

fn default_history_tail() -> usize {
    30
}

fn default_symbols() -> Vec<String> {
    default_universe()
}

fn default_snapshot_ttl_days() -> i64 {
    30
}

fn default_replay_hours() -> u32 {
    24
}

fn default_description_limit() -> usize {
    500
}

// =============================================================================
// AnalysisParams
// =============================================================================

/// Window and lookback settings for the per-symbol analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Short SMA window (trading days).
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    /// Long SMA window. Also the minimum series length.
    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// Number of day-over-day changes averaged by the momentum score.
    #[serde(default = "default_momentum_period")]
    pub momentum_period: usize,

    /// Exclusive ceiling on the trend origin backward scan.
    #[serde(default = "default_origin_lookback")]
    pub origin_lookback: usize,

    /// Trailing window for the 52-week high / low.
    #[serde(default = "default_range_window")]
    pub range_window: usize,

    /// Number of trailing closes attached to each result for charting.
    #[serde(default = "default_history_tail")]
    pub history_tail: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            momentum_period: default_momentum_period(),
            origin_lookback: default_origin_lookback(),
            range_window: default_range_window(),
            history_tail: default_history_tail(),
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        let invalid = |name: &str, reason: &str| AnalysisError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if self.short_window == 0 {
            return Err(invalid("short_window", "must be at least 1"));
        }
        if self.short_window >= self.long_window {
            return Err(invalid("short_window", "must be less than long_window"));
        }
        // Need a previous close for the daily change.
        if self.long_window < 2 {
            return Err(invalid("long_window", "must be at least 2"));
        }
        if self.momentum_period == 0 {
            return Err(invalid("momentum_period", "must be at least 1"));
        }
        if self.origin_lookback < 3 {
            return Err(invalid("origin_lookback", "must be at least 3"));
        }
        if self.range_window == 0 {
            return Err(invalid("range_window", "must be at least 1"));
        }
        Ok(())
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the batch runner.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Indicator windows and lookbacks.
    #[serde(default)]
    pub analysis: AnalysisParams,

    /// Symbols analysed on each run.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Days a history snapshot is retained before expiry.
    #[serde(default = "default_snapshot_ttl_days")]
    pub snapshot_ttl_days: i64,

    /// Hourly snapshots replayed into the dashboard payload.
    #[serde(default = "default_replay_hours")]
    pub replay_hours: u32,

    /// Maximum stored description length in characters.
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisParams::default(),
            symbols: default_symbols(),
            snapshot_ttl_days: default_snapshot_ttl_days(),
            replay_hours: default_replay_hours(),
            description_limit: default_description_limit(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        config
            .analysis
            .validate()
            .with_context(|| format!("invalid analysis settings in {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = config.symbols.len(),
            long_window = config.analysis.long_window,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        write_atomic(path, &content)?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }

    /// Replace the symbol list from a comma-separated string.
    ///
    /// Entries are trimmed and upper-cased; empty entries are dropped. An
    /// input with no usable entries leaves the list unchanged.
    pub fn override_symbols(&mut self, raw: &str) {
        let symbols: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !symbols.is_empty() {
            self.symbols = symbols;
        }
    }
}

/// Write `content` to `path` via a temporary sibling file and a rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    std::fs::write(&tmp_path, content)
        .with_context(|| format!("failed to write tmp file {}", tmp_path.display()))?;

    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to rename tmp file to {}", path.display()))?;

    Ok(())
}
