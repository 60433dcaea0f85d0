use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{EnquiryMessage, NewEnquiryMessage},
    error::{AppError, Result},
    repository::EnquiryRepository,
};

#[derive(FromRow)]
struct EnquiryRow {
    id: i64,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    created_at: NaiveDateTime,
}

impl From<EnquiryRow> for EnquiryMessage {
    fn from(row: EnquiryRow) -> Self {
        EnquiryMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteEnquiryRepository {
    pool: SqlitePool,
}

impl SqliteEnquiryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnquiryRepository for SqliteEnquiryRepository {
    async fn create(&self, message: NewEnquiryMessage) -> Result<EnquiryMessage> {
        let now = Utc::now().naive_utc();

        let id = sqlx::query(
            r#"
            INSERT INTO enquiry_messages (name, email, subject, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created enquiry message".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EnquiryMessage>> {
        let row = sqlx::query_as::<_, EnquiryRow>(
            r#"
            SELECT id, name, email, subject, message, created_at
            FROM enquiry_messages
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(EnquiryMessage::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<EnquiryMessage>> {
        let rows = sqlx::query_as::<_, EnquiryRow>(
            r#"
            SELECT id, name, email, subject, message, created_at
            FROM enquiry_messages
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(EnquiryMessage::from).collect())
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enquiry_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }
}
