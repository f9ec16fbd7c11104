use tracing::instrument;

use crate::error::Error;
use crate::gateway::ApiRequest;
use crate::models::CaseTimeline;

use super::resource::{Cases, Resources};

impl Resources<'_, Cases> {
    /// `GET /api/cases/{id}/timeline`
    #[instrument(skip(self))]
    pub async fn timeline(&self, id: i64) -> Result<CaseTimeline, Error> {
        let path = format!("{}/timeline", Self::item_path(id));
        self.gateway.json(ApiRequest::get(path)).await
    }
}
