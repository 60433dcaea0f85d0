use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{CreateDeadlineRequest, DeadlineName, KeyAdmissionDeadline},
    error::{AppError, Result},
    repository::DeadlineRepository,
};

#[derive(FromRow)]
struct DeadlineRow {
    id: i64,
    name: String,
    deadline_date: NaiveDate,
}

impl TryFrom<DeadlineRow> for KeyAdmissionDeadline {
    type Error = AppError;

    fn try_from(row: DeadlineRow) -> Result<Self> {
        let name = DeadlineName::from_str(&row.name)
            .map_err(|_| AppError::Database(format!("Invalid admission period: {}", row.name)))?;
        Ok(KeyAdmissionDeadline {
            id: row.id,
            name,
            deadline_date: row.deadline_date,
        })
    }
}

pub struct SqliteDeadlineRepository {
    pool: SqlitePool,
}

impl SqliteDeadlineRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeadlineRepository for SqliteDeadlineRepository {
    async fn create(&self, request: CreateDeadlineRequest) -> Result<KeyAdmissionDeadline> {
        let id = sqlx::query("INSERT INTO admission_deadlines (name, deadline_date) VALUES (?, ?)")
            .bind(request.name.as_str())
            .bind(request.deadline_date)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created admission deadline".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<KeyAdmissionDeadline>> {
        let row = sqlx::query_as::<_, DeadlineRow>(
            "SELECT id, name, deadline_date FROM admission_deadlines WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(KeyAdmissionDeadline::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<KeyAdmissionDeadline>> {
        let rows = sqlx::query_as::<_, DeadlineRow>(
            "SELECT id, name, deadline_date FROM admission_deadlines ORDER BY deadline_date, id"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(KeyAdmissionDeadline::try_from).collect()
    }
}
