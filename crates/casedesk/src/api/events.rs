use tracing::instrument;

use crate::error::{Error, InvalidInputError};
use crate::gateway::ApiRequest;
use crate::models::{CalendarMonth, UpcomingEvents};

use super::resource::{Events, Resource, Resources};

impl Resources<'_, Events> {
    /// `GET /api/events/calendar/{year}/{month}`
    ///
    /// # Errors
    ///
    /// `month` outside `1..=12` is rejected before any request is made.
    #[instrument(skip(self))]
    pub async fn calendar(&self, year: i32, month: u32) -> Result<CalendarMonth, Error> {
        if !(1..=12).contains(&month) {
            return Err(InvalidInputError::Other {
                message: format!("month must be between 1 and 12, got {}", month),
            }
            .into());
        }
        let path = format!("{}/calendar/{}/{}", Events::PATH, year, month);
        self.gateway.json(ApiRequest::get(path)).await
    }

    /// `GET /api/events/upcoming/week`
    #[instrument(skip(self))]
    pub async fn upcoming_week(&self) -> Result<UpcomingEvents, Error> {
        let path = format!("{}/upcoming/week", Events::PATH);
        self.gateway.json(ApiRequest::get(path)).await
    }
}
