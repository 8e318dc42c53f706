//! In-process audit trail, owned by whoever needs it rather than shared globally.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::util::generate_id;

/// Maximum number of entries kept; older ones are dropped.
pub const AUDIT_LOG_CAPACITY: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    #[default]
    Info,
    Warning,
    Error,
    Security,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub time: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub action: String,
    pub level: AuditLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Newest-first, bounded list of audit entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        action: impl Into<String>,
        level: AuditLevel,
        user_id: Option<&str>,
        details: Option<serde_json::Value>,
    ) -> &AuditEntry {
        let entry = AuditEntry {
            id: generate_id("AUD"),
            time: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            user_id: user_id.map(str::to_string),
            action: action.into(),
            level,
            details,
        };

        match level {
            AuditLevel::Security | AuditLevel::Error => tracing::warn!(
                target: "routemind::audit",
                action = %entry.action,
                level = ?entry.level,
                user = ?entry.user_id,
                "audit"
            ),
            AuditLevel::Info | AuditLevel::Warning => tracing::info!(
                target: "routemind::audit",
                action = %entry.action,
                level = ?entry.level,
                user = ?entry.user_id,
                "audit"
            ),
        }

        self.entries.push_front(entry);
        self.entries.truncate(AUDIT_LOG_CAPACITY);
        &self.entries[0]
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut log = AuditLog::new();
        log.record("login", AuditLevel::Info, Some("u-1"), None);
        log.record("invoice.delete", AuditLevel::Security, Some("u-1"), None);

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, "invoice.delete");
        assert_eq!(recent[1].action, "login");
        assert!(!recent[0].time.is_empty());
    }

    #[test]
    fn log_is_capped() {
        let mut log = AuditLog::new();
        for n in 0..(AUDIT_LOG_CAPACITY + 25) {
            log.record(format!("action-{n}"), AuditLevel::Info, None, None);
        }
        assert_eq!(log.len(), AUDIT_LOG_CAPACITY);
        let newest = format!("action-{}", AUDIT_LOG_CAPACITY + 24);
        assert_eq!(log.recent(1)[0].action, newest);
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut log = AuditLog::new();
        log.record(
            "payment.apply",
            AuditLevel::Warning,
            None,
            Some(serde_json::json!({"invoice": "INV-1"})),
        );
        let json = serde_json::to_value(&log).expect("encode log");
        assert!(json.is_array());
        assert_eq!(json[0]["level"], "warning");

        let back: AuditLog = serde_json::from_value(json).expect("decode log");
        assert_eq!(back, log);
    }
}
