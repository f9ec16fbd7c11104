use tracing::instrument;

use crate::error::Error;
use crate::gateway::{ApiRequest, Download};
use crate::models::{Document, DocumentUpload, OcrResult};

use super::resource::{Documents, Resource, Resources};

impl Resources<'_, Documents> {
    /// `POST /api/documents` as `multipart/form-data`.
    #[instrument(skip_all, fields(file = %upload.file.file_name))]
    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document, Error> {
        let request = ApiRequest::post(Documents::PATH)
            .multipart(upload.into_multipart());
        self.gateway.json(request).await
    }

    /// Absolute download link, for handing to a browser.
    pub fn download_url(&self, id: i64) -> String {
        self.gateway
            .url_for(&format!("{}/download", Self::item_path(id)))
    }

    /// Absolute inline-preview link.
    pub fn preview_url(&self, id: i64) -> String {
        self.gateway
            .url_for(&format!("{}/preview", Self::item_path(id)))
    }

    /// `GET /api/documents/{id}/download`
    #[instrument(skip(self))]
    pub async fn download(&self, id: i64) -> Result<Download, Error> {
        let path = format!("{}/download", Self::item_path(id));
        self.gateway.download(ApiRequest::get(path)).await
    }

    /// `POST /api/documents/{id}/ocr`
    #[instrument(skip(self))]
    pub async fn run_ocr(&self, id: i64) -> Result<OcrResult, Error> {
        let path = format!("{}/ocr", Self::item_path(id));
        self.gateway.json(ApiRequest::post(path)).await
    }
}
