use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateFeaturedEventRequest, FeaturedEvent},
    error::{AppError, Result},
    repository::FeaturedEventRepository,
};

pub struct SqliteFeaturedEventRepository {
    pool: SqlitePool,
}

impl SqliteFeaturedEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeaturedEventRepository for SqliteFeaturedEventRepository {
    async fn create(&self, request: CreateFeaturedEventRequest) -> Result<FeaturedEvent> {
        let id = sqlx::query(
            r#"
            INSERT INTO featured_events (title, start_date, end_date, image, description)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&request.title)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.image)
        .bind(&request.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created featured event".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FeaturedEvent>> {
        sqlx::query_as::<_, FeaturedEvent>(
            r#"
            SELECT id, title, start_date, end_date, image, description
            FROM featured_events
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<FeaturedEvent>> {
        sqlx::query_as::<_, FeaturedEvent>(
            r#"
            SELECT id, title, start_date, end_date, image, description
            FROM featured_events
            ORDER BY start_date, id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
