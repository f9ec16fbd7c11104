//! Shared CRUD plumbing for the paginated resources.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Error;
use crate::gateway::endpoints;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{
    Case, CaseUpdate, Document, DocumentUpdate, Event, EventUpdate, Identified, LegalAct,
    ListParams, NewCase, NewEvent, NewPerson, Page, Person, PersonUpdate,
};

/// A paginated backend collection.
pub trait Resource {
    type Item: DeserializeOwned + Identified + Clone + Send + fmt::Debug;

    /// Collection path, e.g. `/api/cases`.
    const PATH: &'static str;

    /// Singular noun used in user-facing messages.
    const NOUN: &'static str;

    /// Plural noun used in user-facing messages.
    const PLURAL: &'static str;
}

/// A resource created from a JSON body.
pub trait Creatable: Resource {
    type New: Serialize + Sync;
}

/// A resource updated with a partial JSON body.
pub trait Updatable: Resource {
    type Update: Serialize + Sync;
}

macro_rules! resource {
    ($(#[$doc:meta])* $marker:ident, $item:ty, $path:expr, $noun:literal, $plural:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Resource for $marker {
            type Item = $item;
            const PATH: &'static str = $path;
            const NOUN: &'static str = $noun;
            const PLURAL: &'static str = $plural;
        }
    };
}

resource!(
    /// Court cases.
    Cases, Case, endpoints::CASES, "case", "cases"
);
resource!(
    /// Uploaded documents.
    Documents, Document, endpoints::DOCUMENTS, "document", "documents"
);
resource!(
    /// People involved in cases.
    Persons, Person, endpoints::PERSONS, "person", "persons"
);
resource!(
    /// Case events.
    Events, Event, endpoints::EVENTS, "event", "events"
);
resource!(
    /// Legislation.
    LegalActs, LegalAct, endpoints::LEGAL_ACTS, "legal act", "legal acts"
);

impl Creatable for Cases {
    type New = NewCase;
}

impl Updatable for Cases {
    type Update = CaseUpdate;
}

impl Updatable for Documents {
    type Update = DocumentUpdate;
}

impl Creatable for Persons {
    type New = NewPerson;
}

impl Updatable for Persons {
    type Update = PersonUpdate;
}

impl Creatable for Events {
    type New = NewEvent;
}

impl Updatable for Events {
    type Update = EventUpdate;
}

/// Request wrapper for one resource.
pub struct Resources<'a, R> {
    pub(crate) gateway: &'a Gateway,
    _resource: PhantomData<R>,
}

impl<R> Clone for Resources<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Resources<'_, R> {}

impl<R> fmt::Debug for Resources<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

impl<'a, R: Resource> Resources<'a, R> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            _resource: PhantomData,
        }
    }

    pub(crate) fn item_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// `GET {path}` with paging and filters.
    #[instrument(skip(self), fields(resource = R::PLURAL))]
    pub async fn list(&self, params: &ListParams) -> Result<Page<R::Item>, Error> {
        let request = ApiRequest::get(R::PATH).with_query(params)?;
        self.gateway.json(request).await
    }

    /// `GET {path}/{id}`
    #[instrument(skip(self), fields(resource = R::PLURAL))]
    pub async fn get(&self, id: i64) -> Result<R::Item, Error> {
        self.gateway.json(ApiRequest::get(Self::item_path(id))).await
    }

    /// `DELETE {path}/{id}`
    #[instrument(skip(self), fields(resource = R::PLURAL))]
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.gateway
            .empty(ApiRequest::delete(Self::item_path(id)))
            .await
    }
}

impl<R: Creatable> Resources<'_, R> {
    /// `POST {path}`
    #[instrument(skip_all, fields(resource = R::PLURAL))]
    pub async fn create(&self, new: &R::New) -> Result<R::Item, Error> {
        let request = ApiRequest::post(R::PATH).json(new)?;
        self.gateway.json(request).await
    }
}

impl<R: Updatable> Resources<'_, R> {
    /// `PUT {path}/{id}`
    #[instrument(skip(self, update), fields(resource = R::PLURAL))]
    pub async fn update(&self, id: i64, update: &R::Update) -> Result<R::Item, Error> {
        let request = ApiRequest::put(Self::item_path(id)).json(update)?;
        self.gateway.json(request).await
    }
}
