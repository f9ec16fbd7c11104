use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::api::{Creatable, Resource, Resources, Updatable};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::models::{Identified, ListParams, Page, Pagination};

use super::state::RequestState;

/// Cache of one paginated resource.
pub struct ResourceStore<R: Resource> {
    pub(super) gateway: Gateway,
    pub(super) items: Vec<R::Item>,
    pub(super) current: Option<R::Item>,
    pub(super) pagination: Pagination,
    pub(super) state: RequestState,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            items: Vec::new(),
            current: None,
            pagination: Pagination::default(),
            state: RequestState::default(),
            _resource: PhantomData,
        }
    }

    /// The last fetched page of items.
    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    /// The item last fetched by id.
    pub fn current(&self) -> Option<&R::Item> {
        self.current.as_ref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Select the page the next [`fetch`](Self::fetch) asks for.
    pub fn set_page(&mut self, page: u32) {
        self.pagination.page = page;
    }

    /// Fetch a page. The store's page and size apply unless `params`
    /// overrides them.
    pub async fn fetch(&mut self, params: ListParams) -> Result<Page<R::Item>, Error> {
        let params = params.with_defaults(&self.pagination);
        let fallback = format!("Failed to load {}", R::PLURAL);

        let page = self
            .state
            .track(&fallback, Resources::<R>::new(&self.gateway).list(&params))
            .await?;

        debug!(
            resource = R::PLURAL,
            count = page.items.len(),
            total = page.total,
            "Fetched page"
        );
        self.items = page.items.clone();
        self.pagination = page.pagination();
        Ok(page)
    }

    /// Fetch one item and make it current.
    pub async fn fetch_one(&mut self, id: i64) -> Result<R::Item, Error> {
        let fallback = format!("Failed to load {}", R::NOUN);
        let item = self
            .state
            .track(&fallback, Resources::<R>::new(&self.gateway).get(id))
            .await?;
        self.current = Some(item.clone());
        Ok(item)
    }

    /// Delete an item and drop it from the list.
    pub async fn delete(&mut self, id: i64) -> Result<(), Error> {
        let fallback = format!("Failed to delete {}", R::NOUN);
        self.state
            .track(&fallback, Resources::<R>::new(&self.gateway).delete(id))
            .await?;
        self.items.retain(|item| item.id() != id);
        Ok(())
    }

    pub(super) fn prepend(&mut self, item: R::Item) {
        self.items.insert(0, item);
    }

    pub(super) fn replace(&mut self, item: &R::Item) {
        let id = item.id();
        if let Some(slot) = self.items.iter_mut().find(|i| i.id() == id) {
            *slot = item.clone();
        }
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = Some(item.clone());
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("resource", &R::PLURAL)
            .field("items", &self.items.len())
            .field("current", &self.current.as_ref().map(Identified::id))
            .field("pagination", &self.pagination)
            .field("state", &self.state)
            .finish()
    }
}

impl<R: Creatable> ResourceStore<R> {
    /// Create an item and put it at the top of the list.
    pub async fn create(&mut self, new: &R::New) -> Result<R::Item, Error> {
        let fallback = format!("Failed to create {}", R::NOUN);
        let item = self
            .state
            .track(&fallback, Resources::<R>::new(&self.gateway).create(new))
            .await?;
        self.prepend(item.clone());
        Ok(item)
    }
}

impl<R: Updatable> ResourceStore<R> {
    /// Update an item and refresh it wherever the store holds it.
    pub async fn update(&mut self, id: i64, update: &R::Update) -> Result<R::Item, Error> {
        let fallback = format!("Failed to update {}", R::NOUN);
        let item = self
            .state
            .track(&fallback, Resources::<R>::new(&self.gateway).update(id, update))
            .await?;
        self.replace(&item);
        Ok(item)
    }
}
