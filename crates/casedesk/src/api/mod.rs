//! Per-resource request wrappers.
//!
//! Each wrapper borrows the [`Gateway`] and maps one method to one
//! endpoint. The plain list/get/create/update/delete set is shared through
//! [`Resources`]; the rest are resource-specific.

mod admin;
mod auth;
mod cases;
mod documents;
mod events;
mod legal_acts;
mod persons;
mod reports;
mod resource;
mod search;
mod templates;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use resource::{
    Cases, Creatable, Documents, Events, LegalActs, Persons, Resource, Resources, Updatable,
};
pub use reports::ReportsApi;
pub use search::SearchApi;
pub use templates::TemplatesApi;

pub type CasesApi<'a> = Resources<'a, Cases>;
pub type DocumentsApi<'a> = Resources<'a, Documents>;
pub type PersonsApi<'a> = Resources<'a, Persons>;
pub type EventsApi<'a> = Resources<'a, Events>;
pub type LegalActsApi<'a> = Resources<'a, LegalActs>;

use crate::gateway::Gateway;

/// Entry point to every wrapper.
///
/// ```no_run
/// # async fn demo(gateway: casedesk::Gateway) -> casedesk::Result<()> {
/// use casedesk::api::Api;
/// use casedesk::models::ListParams;
///
/// let api = Api::new(&gateway);
/// let page = api.cases().list(&ListParams::new().search("lease")).await?;
/// println!("{} cases", page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Api<'a> {
    gateway: &'a Gateway,
}

impl<'a> Api<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub fn auth(&self) -> AuthApi<'a> {
        AuthApi::new(self.gateway)
    }

    pub fn cases(&self) -> CasesApi<'a> {
        Resources::new(self.gateway)
    }

    pub fn documents(&self) -> DocumentsApi<'a> {
        Resources::new(self.gateway)
    }

    pub fn persons(&self) -> PersonsApi<'a> {
        Resources::new(self.gateway)
    }

    pub fn events(&self) -> EventsApi<'a> {
        Resources::new(self.gateway)
    }

    pub fn legal_acts(&self) -> LegalActsApi<'a> {
        Resources::new(self.gateway)
    }

    pub fn templates(&self) -> TemplatesApi<'a> {
        TemplatesApi::new(self.gateway)
    }

    pub fn search(&self) -> SearchApi<'a> {
        SearchApi::new(self.gateway)
    }

    pub fn reports(&self) -> ReportsApi<'a> {
        ReportsApi::new(self.gateway)
    }

    pub fn admin(&self) -> AdminApi<'a> {
        AdminApi::new(self.gateway)
    }
}
