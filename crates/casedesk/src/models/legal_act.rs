//! Legislation library.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{FilePart, Multipart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActType {
    Constitution,
    Law,
    Code,
    GovernmentDecision,
    CourtDecision,
    InternationalTreaty,
}

impl ActType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constitution => "constitution",
            Self::Law => "law",
            Self::Code => "code",
            Self::GovernmentDecision => "government_decision",
            Self::CourtDecision => "court_decision",
            Self::InternationalTreaty => "international_treaty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActStatus {
    #[default]
    Active,
    Repealed,
    Amended,
}

impl ActStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Repealed => "repealed",
            Self::Amended => "amended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalAct {
    pub id: i64,
    pub act_type: ActType,
    #[serde(default)]
    pub act_number: Option<String>,
    #[serde(default)]
    pub act_date: Option<NaiveDate>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub act_status: ActStatus,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct LegalActUpload {
    pub file: FilePart,
    pub act_type: ActType,
    pub title: String,
    pub act_number: Option<String>,
    pub act_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub act_status: ActStatus,
}

impl LegalActUpload {
    pub fn new(file: FilePart, act_type: ActType, title: impl Into<String>) -> Self {
        Self {
            file,
            act_type,
            title: title.into(),
            act_number: None,
            act_date: None,
            tags: Vec::new(),
            act_status: ActStatus::Active,
        }
    }

    pub(crate) fn into_multipart(self) -> Multipart {
        let mut form = Multipart::new()
            .file(self.file)
            .text("act_type", self.act_type.as_str())
            .text("title", self.title)
            .text("act_status", self.act_status.as_str());

        if let Some(number) = self.act_number {
            form = form.text("act_number", number);
        }
        if let Some(date) = self.act_date {
            form = form.text("act_date", date.to_string());
        }
        if !self.tags.is_empty() {
            form = form.text("tags", Value::from(self.tags).to_string());
        }
        form
    }
}
