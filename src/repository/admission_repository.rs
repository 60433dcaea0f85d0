use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{AdmissionMessage, NewAdmissionMessage},
    error::{AppError, Result},
    repository::AdmissionRepository,
};

#[derive(FromRow)]
struct AdmissionRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    created_at: NaiveDateTime,
}

impl From<AdmissionRow> for AdmissionMessage {
    fn from(row: AdmissionRow) -> Self {
        AdmissionMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteAdmissionRepository {
    pool: SqlitePool,
}

impl SqliteAdmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdmissionRepository for SqliteAdmissionRepository {
    async fn create(&self, message: NewAdmissionMessage) -> Result<AdmissionMessage> {
        let now = Utc::now().naive_utc();

        let id = sqlx::query(
            r#"
            INSERT INTO admission_messages (name, email, phone, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created admission message".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AdmissionMessage>> {
        let row = sqlx::query_as::<_, AdmissionRow>(
            r#"
            SELECT id, name, email, phone, message, created_at
            FROM admission_messages
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(AdmissionMessage::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<AdmissionMessage>> {
        let rows = sqlx::query_as::<_, AdmissionRow>(
            r#"
            SELECT id, name, email, phone, message, created_at
            FROM admission_messages
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(AdmissionMessage::from).collect())
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admission_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }
}
