//! Top-level client handle.

use std::sync::Arc;

use crate::api::Api;
use crate::auth::{CredentialStore, SessionContext};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::gateway::Gateway;
use crate::router::Navigator;
use crate::store::{
    AuthStore, CasesStore, DocumentsStore, EventsStore, LegalActsStore, PersonsStore,
};

/// A configured gateway plus constructors for the wrappers and stores
/// built on it. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    gateway: Gateway,
}

impl Client {
    pub fn new(
        config: &ClientConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway: Gateway::new(config, session, navigator),
        }
    }

    /// Restore the session held in `store` and build a client over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(
        config: &ClientConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let session = SessionContext::restore(store)?;
        Ok(Self::new(config, session, navigator))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionContext {
        self.gateway.session()
    }

    /// The per-resource request wrappers.
    pub fn api(&self) -> Api<'_> {
        Api::new(&self.gateway)
    }

    pub fn auth_store(&self) -> AuthStore {
        AuthStore::new(self.gateway.clone())
    }

    pub fn cases_store(&self) -> CasesStore {
        CasesStore::new(self.gateway.clone())
    }

    pub fn documents_store(&self) -> DocumentsStore {
        DocumentsStore::new(self.gateway.clone())
    }

    pub fn persons_store(&self) -> PersonsStore {
        PersonsStore::new(self.gateway.clone())
    }

    pub fn events_store(&self) -> EventsStore {
        EventsStore::new(self.gateway.clone())
    }

    pub fn legal_acts_store(&self) -> LegalActsStore {
        LegalActsStore::new(self.gateway.clone())
    }
}
