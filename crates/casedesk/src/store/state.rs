use std::future::Future;

use tracing::debug;

use crate::error::Error;

/// Lifecycle of the most recent request made through a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestState {
    /// Drive `request`, keeping `loading` and `error` in step with it.
    ///
    /// On failure `error` gets the backend's message, or `fallback` when
    /// the backend sent none.
    pub(crate) async fn track<T, F>(&mut self, fallback: &str, request: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        self.loading = true;
        self.error = None;

        let result = request.await;

        self.loading = false;
        if let Err(ref e) = result {
            debug!(error = %e, "Store request failed");
            self.error = Some(e.user_message(fallback));
        }
        result
    }
}
