//! Administration: settings, audit log, backups and system information.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Body of `PUT /api/admin/settings/{key}`. A missing description is sent
/// as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingUpdate {
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub old_value: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub new_value: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditLogParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupResult {
    pub success: bool,
    pub filename: String,
    pub size: u64,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

/// Deployment information reported by `GET /api/admin/system-info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub version: String,
    pub environment: String,
    pub debug: bool,
    pub ollama: OllamaInfo,
    pub database: DatabaseInfo,
    pub storage: StorageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaInfo {
    pub enabled: bool,
    pub available: bool,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseInfo {
    pub total_cases: u64,
    pub total_persons: u64,
    pub total_documents: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageInfo {
    pub path: Option<String>,
    pub max_file_size: Option<u64>,
}
