use tracing::instrument;

use crate::error::Error;
use crate::gateway::ApiRequest;
use crate::models::{LegalAct, LegalActUpload};

use super::resource::{LegalActs, Resource, Resources};

impl Resources<'_, LegalActs> {
    /// `POST /api/legal-acts` as `multipart/form-data`.
    #[instrument(skip_all, fields(title = %upload.title))]
    pub async fn upload(&self, upload: LegalActUpload) -> Result<LegalAct, Error> {
        let request = ApiRequest::post(LegalActs::PATH).multipart(upload.into_multipart());
        self.gateway.json(request).await
    }

    /// Absolute download link.
    pub fn download_url(&self, id: i64) -> String {
        self.gateway
            .url_for(&format!("{}/download", Self::item_path(id)))
    }
}
