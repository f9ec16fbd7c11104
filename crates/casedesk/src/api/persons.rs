use tracing::instrument;

use crate::error::Error;
use crate::gateway::ApiRequest;
use crate::models::PersonCases;

use super::resource::{Persons, Resources};

impl Resources<'_, Persons> {
    /// `GET /api/persons/{id}/cases`: the cases a person takes part in.
    #[instrument(skip(self))]
    pub async fn cases(&self, id: i64) -> Result<PersonCases, Error> {
        let path = format!("{}/cases", Self::item_path(id));
        self.gateway.json(ApiRequest::get(path)).await
    }
}
