//! Persistent on-disk caching of the destination rate table.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::domain::{DestinationRate, RateTable};

const RATES_CACHE_FILENAME: &str = "rate_table_cache.json";

/// Default TTL: 24 hours. Rates are reference data and change rarely.
pub const RATE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Cached rate table with its fetch timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTableCache {
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    pub rates: Vec<DestinationRate>,
}

impl RateTableCache {
    pub fn new(rates: Vec<DestinationRate>) -> Self {
        Self {
            cached_at: unix_now(),
            rates,
        }
    }

    pub fn rate_table(&self) -> RateTable {
        RateTable::new(self.rates.clone())
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    pub fn age(&self) -> Duration {
        Duration::from_secs(unix_now().saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Default cache file path in the local data directory.
pub fn default_cache_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("routemind")
        .join(RATES_CACHE_FILENAME)
}

/// Loads the cache at `path` if present, readable and younger than `ttl`.
pub fn load_rate_cache(path: &Path, ttl: Duration) -> Option<RateTableCache> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no rate table cache");
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<RateTableCache>(&content) {
            Ok(cache) => {
                if cache.is_expired(ttl) {
                    tracing::info!(age = %cache.age_string(), "rate table cache expired");
                    return None;
                }
                tracing::debug!(
                    rates = cache.rates.len(),
                    age = %cache.age_string(),
                    "loaded rate table cache"
                );
                Some(cache)
            }
            Err(e) => {
                tracing::warn!("failed to parse rate table cache: {e}");
                None
            }
        },
        Err(e) => {
            tracing::warn!("failed to read rate table cache: {e}");
            None
        }
    }
}

pub fn save_rate_cache(path: &Path, cache: &RateTableCache) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(path, content)?;
    tracing::info!(
        rates = cache.rates.len(),
        path = %path.display(),
        "saved rate table cache"
    );
    Ok(())
}
