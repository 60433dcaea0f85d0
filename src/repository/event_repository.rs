use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CreateEventRequest, Event, EventCategory, EventFilter},
    error::{AppError, Result},
    repository::EventRepository,
};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    category: String,
    year: i64,
    month: i64,
    day: i64,
    start_time: NaiveTime,
    end_time: NaiveTime,
    location: String,
    description: String,
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        let category = row
            .category
            .parse::<EventCategory>()
            .map_err(|_| AppError::Database(format!("Invalid event category: {}", row.category)))?;
        let narrow = |value: i64, column: &str| {
            u32::try_from(value)
                .map_err(|_| AppError::Database(format!("Invalid event {}: {}", column, value)))
        };

        Ok(Event {
            id: row.id,
            title: row.title,
            category,
            year: i32::try_from(row.year)
                .map_err(|_| AppError::Database(format!("Invalid event year: {}", row.year)))?,
            month: narrow(row.month, "month")?,
            day: narrow(row.day, "day")?,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            description: row.description,
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        let id = sqlx::query(
            r#"
            INSERT INTO events (
                title, category, year, month, day,
                start_time, end_time, location, description
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&request.title)
        .bind(request.category.as_str())
        .bind(request.year)
        .bind(request.month)
        .bind(request.day)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(&request.location)
        .bind(&request.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created event".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, category, year, month, day,
                   start_time, end_time, location, description
            FROM events
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_event).transpose()
    }

    async fn list(&self, filter: EventFilter) -> Result<Vec<Event>> {
        let month = filter.month.map(i64::from);
        let category = filter.category.map(|c| c.as_str());

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, category, year, month, day,
                   start_time, end_time, location, description
            FROM events
            WHERE (? IS NULL OR month = ?)
              AND (? IS NULL OR category = ?)
            ORDER BY year DESC, month ASC, day ASC, id ASC
            "#
        )
        .bind(month)
        .bind(month)
        .bind(category)
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }
}
