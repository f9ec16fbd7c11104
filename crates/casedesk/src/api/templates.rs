use tracing::instrument;

use crate::error::Error;
use crate::gateway::endpoints::TEMPLATES;
use crate::gateway::{ApiRequest, Download, Gateway};
use crate::models::{Template, TemplateList, TemplateUpload};

/// Document template endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TemplatesApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> TemplatesApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/templates`
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<TemplateList, Error> {
        self.gateway.json(ApiRequest::get(TEMPLATES)).await
    }

    /// `POST /api/templates` as `multipart/form-data`.
    #[instrument(skip_all, fields(name = %upload.template_name))]
    pub async fn upload(&self, upload: TemplateUpload) -> Result<Template, Error> {
        let request = ApiRequest::post(TEMPLATES).multipart(upload.into_multipart());
        self.gateway.json(request).await
    }

    /// `POST /api/templates/{id}/generate`: fill the template with a case's
    /// data and fetch the result.
    #[instrument(skip(self))]
    pub async fn generate(&self, template_id: i64, case_id: i64) -> Result<Download, Error> {
        let request = ApiRequest::post(format!("{}/{}/generate", TEMPLATES, template_id))
            .query_pair("case_id", case_id)
            .json(&serde_json::json!({ "case_id": case_id }))?;
        self.gateway.download(request).await
    }

    /// `DELETE /api/templates/{id}`
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.gateway
            .empty(ApiRequest::delete(format!("{}/{}", TEMPLATES, id)))
            .await
    }
}
