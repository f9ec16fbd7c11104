use std::ops::{Deref, DerefMut};

use crate::api::{Cases, Resources};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::models::{CaseTimeline, TimelineEntry};

use super::resource::ResourceStore;

/// Case list and detail, plus the timeline of the case being viewed.
#[derive(Debug)]
pub struct CasesStore {
    cases: ResourceStore<Cases>,
    timeline: Vec<TimelineEntry>,
}

impl CasesStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            cases: ResourceStore::new(gateway),
            timeline: Vec::new(),
        }
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Fetch the history of a case.
    pub async fn fetch_timeline(&mut self, id: i64) -> Result<CaseTimeline, Error> {
        let store = &mut self.cases;
        let timeline = store
            .state
            .track(
                "Failed to load timeline",
                Resources::<Cases>::new(&store.gateway).timeline(id),
            )
            .await?;
        self.timeline = timeline.timeline.clone();
        Ok(timeline)
    }
}

impl Deref for CasesStore {
    type Target = ResourceStore<Cases>;

    fn deref(&self) -> &Self::Target {
        &self.cases
    }
}

impl DerefMut for CasesStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cases
    }
}
