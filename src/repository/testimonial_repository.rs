use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateTestimonialRequest, Testimonial},
    error::{AppError, Result},
    repository::TestimonialRepository,
};

pub struct SqliteTestimonialRepository {
    pool: SqlitePool,
}

impl SqliteTestimonialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialRepository for SqliteTestimonialRepository {
    async fn create(&self, request: CreateTestimonialRequest) -> Result<Testimonial> {
        let id = sqlx::query(
            r#"
            INSERT INTO testimonials (name, title, testimonial, image)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&request.name)
        .bind(&request.title)
        .bind(&request.testimonial)
        .bind(&request.image)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created testimonial".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, title, testimonial, image FROM testimonials WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, title, testimonial, image FROM testimonials ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
