//! Uploaded documents.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{FilePart, Multipart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Lawsuit,
    Motion,
    Complaint,
    CourtDecision,
    PowerOfAttorney,
    Contract,
    Correspondence,
    Evidence,
    ExpertOpinion,
    Other,
}

impl DocumentType {
    /// The wire name, as used in form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lawsuit => "lawsuit",
            Self::Motion => "motion",
            Self::Complaint => "complaint",
            Self::CourtDecision => "court_decision",
            Self::PowerOfAttorney => "power_of_attorney",
            Self::Contract => "contract",
            Self::Correspondence => "correspondence",
            Self::Evidence => "evidence",
            Self::ExpertOpinion => "expert_opinion",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub case_id: Option<i64>,
    pub document_type: DocumentType,
    #[serde(default)]
    pub document_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_template: bool,
    pub file_name: String,
    pub original_file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(with = "super::timestamp")]
    pub upload_date: NaiveDateTime,
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub extracted_metadata: Option<BTreeMap<String, Value>>,
    #[serde(default = "first_version")]
    pub version: u32,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

fn first_version() -> u32 {
    1
}

/// Partial update of a document's metadata.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
}

/// A file plus its metadata, sent as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file: FilePart,
    pub document_type: DocumentType,
    pub case_id: Option<i64>,
    pub document_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub is_template: bool,
    pub auto_ocr: bool,
}

impl DocumentUpload {
    pub fn new(file: FilePart, document_type: DocumentType) -> Self {
        Self {
            file,
            document_type,
            case_id: None,
            document_date: None,
            description: None,
            tags: Vec::new(),
            is_template: false,
            auto_ocr: true,
        }
    }

    pub(crate) fn into_multipart(self) -> Multipart {
        let mut form = Multipart::new()
            .file(self.file)
            .text("document_type", self.document_type.as_str())
            .text("is_template", self.is_template.to_string())
            .text("auto_ocr", self.auto_ocr.to_string());

        if let Some(case_id) = self.case_id {
            form = form.text("case_id", case_id.to_string());
        }
        if let Some(date) = self.document_date {
            form = form.text("document_date", date.to_string());
        }
        if let Some(description) = self.description {
            form = form.text("description", description);
        }
        if !self.tags.is_empty() {
            // The backend expects tags as a JSON array string
            form = form.text("tags", Value::from(self.tags).to_string());
        }
        form
    }
}

/// Result of an OCR run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub document_id: i64,
    pub ocr_text: String,
    pub success: bool,
}
