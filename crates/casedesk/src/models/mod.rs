//! Typed request and response bodies for the backend API.

mod admin;
mod case;
mod document;
mod event;
mod legal_act;
mod page;
mod person;
mod report;
mod search;
mod template;
pub(crate) mod timestamp;
mod user;

pub use admin::{
    AuditLogEntry, AuditLogParams, BackupResult, DatabaseInfo, OllamaInfo, Setting,
    SettingUpdate, StorageInfo, SystemInfo,
};
pub use case::{Case, CaseStatus, CaseTimeline, CaseType, CaseUpdate, NewCase, TimelineEntry};
pub use document::{Document, DocumentType, DocumentUpdate, DocumentUpload, OcrResult};
pub use event::{
    CalendarEvent, CalendarMonth, Event, EventStatus, EventType, EventUpdate, NewEvent,
    UpcomingEvent, UpcomingEvents,
};
pub use legal_act::{ActStatus, ActType, LegalAct, LegalActUpload};
pub use page::{DEFAULT_PAGE_SIZE, ListParams, Page, Pagination};
pub use person::{NewPerson, Person, PersonCase, PersonCases, PersonType, PersonUpdate};
pub use report::{ExportParams, Statistics};
pub use search::{
    CaseHit, DocumentHit, FulltextHit, FulltextResults, GlobalSearchResults, LegalActHit,
    PersonHit, SearchParams, SemanticResults,
};
pub use template::{Template, TemplateList, TemplateUpload};
pub use user::{NewUser, TokenPair, User, UserRole, UserUpdate};

/// Anything with a numeric primary key; the stores use it to find items.
pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(Case, Document, Person, Event, LegalAct, Template, User);
