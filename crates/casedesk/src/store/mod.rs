//! Client-side state stores.
//!
//! A store caches what the backend returned (a page of items, the item
//! being viewed, pagination) together with the state of the last request.
//! Failures are recorded as a message fit for display and then returned
//! to the caller unchanged.

mod auth;
mod cases;
mod documents;
mod resource;
mod state;

pub use auth::AuthStore;
pub use cases::CasesStore;
pub use documents::DocumentsStore;
pub use resource::ResourceStore;
pub use state::RequestState;

use crate::api::{Events, LegalActs, Persons};

pub type PersonsStore = ResourceStore<Persons>;
pub type EventsStore = ResourceStore<Events>;
pub type LegalActsStore = ResourceStore<LegalActs>;
