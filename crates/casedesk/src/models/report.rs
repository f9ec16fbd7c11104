//! Reporting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Case counts for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_cases: u64,
    pub total_documents: u64,
    pub cases_by_status: BTreeMap<String, u64>,
    pub cases_by_type: BTreeMap<String, u64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Query for `GET /api/reports/export/cases`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportParams {
    /// `csv` or `excel`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
