use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    calendar::{self, CalendarView, YearMonth},
    domain::{CreateEventRequest, Event, EventCategory, EventFilter},
    error::Result,
    repository::EventRepository,
};

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// Events matching the raw `month`/`category` query values. A value that
    /// names no month or category yields an empty list.
    pub async fn list(&self, month: Option<&str>, category: Option<&str>) -> Result<Vec<Event>> {
        match EventFilter::from_query(month, category) {
            Some(filter) => self.repo.list(filter).await,
            None => {
                tracing::debug!(?month, ?category, "Event filter matches nothing");
                Ok(Vec::new())
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Event>> {
        self.repo.list(EventFilter::default()).await
    }

    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        request.validate()?;
        self.repo.create(request).await
    }

    /// Month grid for the requested `year`/`month` query values, falling back
    /// to the month containing `today` when either is missing or invalid.
    pub async fn calendar(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> Result<CalendarView> {
        let target = YearMonth::from_query(year, month, today);
        let events = self.list_all().await?;
        Ok(CalendarView::build(&events, target, today))
    }

    pub async fn upcoming_counts(&self, today: NaiveDate) -> Result<BTreeMap<EventCategory, usize>> {
        let events = self.list_all().await?;
        Ok(calendar::upcoming_counts(&events, today))
    }
}
