use serde::Serialize;
use tracing::instrument;

use crate::error::Error;
use crate::gateway::endpoints::SEARCH;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{FulltextResults, GlobalSearchResults, SearchParams, SemanticResults};

/// Results requested from the semantic search.
const SEMANTIC_TOP_K: u32 = 10;

#[derive(Serialize)]
struct SemanticQuery<'a> {
    query: &'a str,
    top_k: u32,
}

/// Search endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SearchApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> SearchApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/search?q=...` across cases, persons, documents and acts.
    #[instrument(skip(self))]
    pub async fn global(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<GlobalSearchResults, Error> {
        let request = ApiRequest::get(SEARCH)
            .query_pair("q", query)
            .with_query(params)?;
        self.gateway.json(request).await
    }

    /// `GET /api/search/fulltext?q=...` over document text.
    #[instrument(skip(self))]
    pub async fn fulltext(&self, query: &str) -> Result<FulltextResults, Error> {
        let request = ApiRequest::get(format!("{}/fulltext", SEARCH)).query_pair("q", query);
        self.gateway.json(request).await
    }

    /// `POST /api/search/semantic`
    #[instrument(skip(self))]
    pub async fn semantic(&self, query: &str) -> Result<SemanticResults, Error> {
        let request = ApiRequest::post(format!("{}/semantic", SEARCH)).json(&SemanticQuery {
            query,
            top_k: SEMANTIC_TOP_K,
        })?;
        self.gateway.json(request).await
    }
}
