//! Court cases.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Civil,
    Criminal,
    Administrative,
    International,
    Arbitration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    New,
    InProgress,
    Suspended,
    Closed,
    Archived,
}

/// A case record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: i64,
    pub case_number: String,
    pub case_prefix: String,
    pub case_type: CaseType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub plaintiff: Option<String>,
    #[serde(default)]
    pub defendant: Option<String>,
    #[serde(default)]
    pub case_status: CaseStatus,
    pub open_date: NaiveDate,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Body for creating a case. The server assigns the case number.
#[derive(Debug, Clone, Serialize)]
pub struct NewCase {
    pub case_prefix: String,
    pub case_type: CaseType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintiff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defendant: Option<String>,
    pub case_status: CaseStatus,
    pub open_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, Value>,
}

impl NewCase {
    pub fn new(
        case_prefix: impl Into<String>,
        case_type: CaseType,
        title: impl Into<String>,
        open_date: NaiveDate,
    ) -> Self {
        Self {
            case_prefix: case_prefix.into(),
            case_type,
            title: title.into(),
            description: None,
            court: None,
            judge: None,
            plaintiff: None,
            defendant: None,
            case_status: CaseStatus::New,
            open_date,
            close_date: None,
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Partial update of a case. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<CaseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintiff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defendant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// History of a case, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTimeline {
    pub case_id: i64,
    pub case_number: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(with = "super::timestamp")]
    pub date: NaiveDateTime,
    pub event_type: String,
    pub description: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}
