use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::domain::{AuditLog, Currency};
use crate::infra::api::Session;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "RouteMind";
const APP_NAME: &str = "RouteMind";

const SETTINGS_FILE: &str = "settings.json";
const SESSION_FILE: &str = "session.json";
const AUDIT_FILE: &str = "audit_log.json";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1/";
pub const API_URL_ENV: &str = "ROUTEMIND_API_URL";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub default_currency: Currency,
    pub rate_cache_ttl_hours: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_currency: Currency::Eur,
            rate_cache_ttl_hours: 24,
        }
    }
}

impl Settings {
    /// Base URL after applying the environment override.
    pub fn effective_api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }

    /// Rate table lifetime; absurd hour counts saturate instead of wrapping.
    pub fn rate_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_cache_ttl_hours.saturating_mul(60 * 60))
    }
}

fn config_file(name: &str) -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().join(name))
}

/// Reads a JSON document; missing or unreadable files yield `None`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring corrupt state file: {err}");
            None
        }
    }
}

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "saved state");
    Ok(())
}

pub fn load_settings() -> Settings {
    config_file(SETTINGS_FILE)
        .and_then(|path| load_json(&path))
        .unwrap_or_default()
}

pub fn save_settings(settings: &Settings) -> Result<(), PersistSaveError> {
    let path = config_file(SETTINGS_FILE).ok_or(PersistSaveError::StorageUnavailable)?;
    save_json(&path, settings)
}

pub fn load_session() -> Session {
    config_file(SESSION_FILE)
        .and_then(|path| load_json(&path))
        .unwrap_or_default()
}

pub fn save_session(session: &Session) -> Result<(), PersistSaveError> {
    let path = config_file(SESSION_FILE).ok_or(PersistSaveError::StorageUnavailable)?;
    save_json(&path, session)
}

pub fn load_audit_log() -> AuditLog {
    config_file(AUDIT_FILE)
        .and_then(|path| load_json(&path))
        .unwrap_or_default()
}

pub fn save_audit_log(log: &AuditLog) -> Result<(), PersistSaveError> {
    let path = config_file(AUDIT_FILE).ok_or(PersistSaveError::StorageUnavailable)?;
    save_json(&path, log)
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tmp");
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            api_base_url: "https://ops.example.test/api/v1/".into(),
            default_currency: Currency::Dzd,
            rate_cache_ttl_hours: 6,
        };

        save_json(&path, &settings).expect("save settings");
        let loaded: Settings = load_json(&path).expect("load settings");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_or_corrupt_files_fall_back() {
        let dir = tempfile::tempdir().expect("tmp");
        let missing = dir.path().join("absent.json");
        assert!(load_json::<Settings>(&missing).is_none());

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{not json").expect("write corrupt");
        assert!(load_json::<Settings>(&corrupt).is_none());
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let parsed: Settings =
            serde_json::from_str(r#"{"rate_cache_ttl_hours": 1}"#).expect("partial settings");
        assert_eq!(parsed.rate_cache_ttl_hours, 1);
        assert_eq!(parsed.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(parsed.default_currency, Currency::Eur);
    }

    #[test]
    fn cache_ttl_saturates() {
        let day = Settings::default();
        assert_eq!(day.rate_cache_ttl(), Duration::from_secs(24 * 60 * 60));

        let forever = Settings {
            rate_cache_ttl_hours: u64::MAX,
            ..Settings::default()
        };
        assert_eq!(forever.rate_cache_ttl(), Duration::from_secs(u64::MAX));
    }
}
