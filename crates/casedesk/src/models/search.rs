//! Search results.

use serde::{Deserialize, Serialize};

use super::{ActType, CaseStatus, CaseType, DocumentType, PersonType};

/// Extra parameters for the global search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchParams {
    /// One of `all`, `cases`, `persons`, `documents`, `legal_acts`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Matches across every searchable entity, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSearchResults {
    pub query: String,
    pub cases: Vec<CaseHit>,
    pub persons: Vec<PersonHit>,
    pub documents: Vec<DocumentHit>,
    pub legal_acts: Vec<LegalActHit>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseHit {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub case_type: CaseType,
    pub case_status: CaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonHit {
    pub id: i64,
    pub full_name: String,
    pub person_type: PersonType,
    #[serde(default)]
    pub idnp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHit {
    pub id: i64,
    pub file_name: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub case_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalActHit {
    pub id: i64,
    pub title: String,
    pub act_type: ActType,
    #[serde(default)]
    pub act_number: Option<String>,
}

/// Ranked full-text matches over document OCR text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulltextResults {
    pub query: String,
    pub documents: Vec<FulltextHit>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulltextHit {
    pub id: i64,
    pub file_name: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub case_id: Option<i64>,
    pub relevance_score: f64,
}

/// Semantic search response. The backend feature is experimental, so the
/// result entries are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticResults {
    pub query: String,
    pub message: Option<String>,
    pub results: Vec<serde_json::Value>,
}
