use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{AlumniMessage, CreateAlumniMessageRequest},
    error::{AppError, Result},
    repository::AlumniRepository,
};

pub struct SqliteAlumniRepository {
    pool: SqlitePool,
}

impl SqliteAlumniRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlumniRepository for SqliteAlumniRepository {
    async fn create(&self, request: CreateAlumniMessageRequest, year_of_completion: i32) -> Result<AlumniMessage> {
        let id = sqlx::query(
            r#"
            INSERT INTO alumni_messages (name, title, year_of_completion, message, image)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&request.name)
        .bind(&request.title)
        .bind(year_of_completion)
        .bind(&request.message)
        .bind(&request.image)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created alumni message".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AlumniMessage>> {
        sqlx::query_as::<_, AlumniMessage>(
            r#"
            SELECT id, name, title, year_of_completion, message, image
            FROM alumni_messages
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<AlumniMessage>> {
        sqlx::query_as::<_, AlumniMessage>(
            r#"
            SELECT id, name, title, year_of_completion, message, image
            FROM alumni_messages
            ORDER BY year_of_completion DESC, id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
