use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::state::AppState,
    calendar::{self, CalendarView},
    domain::{format_clock, Event, EventCategory},
    error::Result,
};

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub month: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub category: EventCategory,
    /// Month name, e.g. "March".
    pub month: &'static str,
    pub day: u32,
    pub year: i32,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            month: event.month_name(),
            start_time: format_clock(event.start_time),
            end_time: format_clock(event.end_time),
            id: event.id,
            title: event.title,
            category: event.category,
            day: event.day,
            year: event.year,
            location: event.location,
            description: event.description,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventResponse>>> {
    let events = state
        .service_context
        .event_service
        .list(query.month.as_deref(), query.category.as_deref())
        .await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>> {
    let view = state
        .service_context
        .event_service
        .calendar(query.year.as_deref(), query.month.as_deref(), calendar::today())
        .await?;
    Ok(Json(view))
}
