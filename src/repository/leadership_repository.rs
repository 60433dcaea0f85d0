use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateLeadershipMessageRequest, LeadershipMessage},
    error::{AppError, Result},
    repository::LeadershipRepository,
};

pub struct SqliteLeadershipRepository {
    pool: SqlitePool,
}

impl SqliteLeadershipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadershipRepository for SqliteLeadershipRepository {
    async fn create(&self, request: CreateLeadershipMessageRequest) -> Result<LeadershipMessage> {
        let id = sqlx::query(
            r#"
            INSERT INTO leadership_messages (salutation, name, designation, message, image)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&request.salutation)
        .bind(&request.name)
        .bind(&request.designation)
        .bind(&request.message)
        .bind(&request.image)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created leadership message".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LeadershipMessage>> {
        sqlx::query_as::<_, LeadershipMessage>(
            r#"
            SELECT id, salutation, name, designation, message, image
            FROM leadership_messages
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<LeadershipMessage>> {
        sqlx::query_as::<_, LeadershipMessage>(
            r#"
            SELECT id, salutation, name, designation, message, image
            FROM leadership_messages
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
