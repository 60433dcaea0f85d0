use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateGalleryImageRequest, GalleryImage},
    error::{AppError, Result},
    repository::GalleryRepository,
};

pub struct SqliteGalleryRepository {
    pool: SqlitePool,
}

impl SqliteGalleryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryRepository for SqliteGalleryRepository {
    async fn create(&self, request: CreateGalleryImageRequest) -> Result<GalleryImage> {
        let id = sqlx::query("INSERT INTO gallery_images (title, image) VALUES (?, ?)")
            .bind(&request.title)
            .bind(&request.image)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created gallery image".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryImage>> {
        sqlx::query_as::<_, GalleryImage>("SELECT id, title, image FROM gallery_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<GalleryImage>> {
        sqlx::query_as::<_, GalleryImage>("SELECT id, title, image FROM gallery_images ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
