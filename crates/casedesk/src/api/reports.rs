use tracing::instrument;

use crate::error::Error;
use crate::gateway::endpoints::REPORTS;
use crate::gateway::{ApiRequest, Download, Gateway};
use crate::models::{ExportParams, Statistics};

/// Report endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ReportsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ReportsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/reports/case/{id}/pdf`
    #[instrument(skip(self))]
    pub async fn case_pdf(&self, case_id: i64) -> Result<Download, Error> {
        let path = format!("{}/case/{}/pdf", REPORTS, case_id);
        self.gateway.download(ApiRequest::get(path)).await
    }

    /// `GET /api/reports/statistics`
    #[instrument(skip(self))]
    pub async fn statistics(&self) -> Result<Statistics, Error> {
        let path = format!("{}/statistics", REPORTS);
        self.gateway.json(ApiRequest::get(path)).await
    }

    /// `GET /api/reports/export/cases`
    #[instrument(skip(self))]
    pub async fn export_cases(&self, params: &ExportParams) -> Result<Download, Error> {
        let request =
            ApiRequest::get(format!("{}/export/cases", REPORTS)).with_query(params)?;
        self.gateway.download(request).await
    }
}
