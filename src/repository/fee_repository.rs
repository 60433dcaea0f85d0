use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{to_cents, FeeAmounts, FeeStructure, FeeStructureInput, SchoolLevel},
    error::{AppError, Result},
    repository::FeeRepository,
};

#[derive(FromRow)]
struct FeeRow {
    id: i64,
    level: String,
    tuition_per_term: String,
    meals_fee: String,
    transport_fee: String,
    total_fee: String,
    file: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteFeeRepository {
    pool: SqlitePool,
}

impl SqliteFeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_amount(column: &str, value: &str) -> Result<Decimal> {
        Decimal::from_str(value)
            .map_err(|e| AppError::Database(format!("Invalid {} '{}': {}", column, value, e)))
    }

    fn row_to_fee(row: FeeRow) -> Result<FeeStructure> {
        let level = SchoolLevel::from_str(&row.level)
            .map_err(|_| AppError::Database(format!("Invalid school level: {}", row.level)))?;

        Ok(FeeStructure {
            id: row.id,
            level,
            amounts: FeeAmounts {
                tuition_per_term: Self::parse_amount("tuition_per_term", &row.tuition_per_term)?,
                meals_fee: Self::parse_amount("meals_fee", &row.meals_fee)?,
                transport_fee: Self::parse_amount("transport_fee", &row.transport_fee)?,
            },
            total_fee: Self::parse_amount("total_fee", &row.total_fee)?,
            file: row.file,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn cents(amount: Decimal) -> String {
        to_cents(amount).to_string()
    }
}

#[async_trait]
impl FeeRepository for SqliteFeeRepository {
    async fn create(&self, input: FeeStructureInput) -> Result<FeeStructure> {
        let now = Utc::now().naive_utc();
        let amounts = input.amounts;

        let id = sqlx::query(
            r#"
            INSERT INTO fee_structures (
                level, tuition_per_term, meals_fee, transport_fee, total_fee,
                file, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(input.level.as_str())
        .bind(Self::cents(amounts.tuition_per_term))
        .bind(Self::cents(amounts.meals_fee))
        .bind(Self::cents(amounts.transport_fee))
        .bind(Self::cents(amounts.total()))
        .bind(&input.file)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created fee structure".to_string())
        })
    }

    async fn update(&self, id: i64, input: FeeStructureInput) -> Result<FeeStructure> {
        let now = Utc::now().naive_utc();
        let amounts = input.amounts;

        let result = sqlx::query(
            r#"
            UPDATE fee_structures
            SET level = ?, tuition_per_term = ?, meals_fee = ?, transport_fee = ?,
                total_fee = ?, file = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(input.level.as_str())
        .bind(Self::cents(amounts.tuition_per_term))
        .bind(Self::cents(amounts.meals_fee))
        .bind(Self::cents(amounts.transport_fee))
        .bind(Self::cents(amounts.total()))
        .bind(&input.file)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Fee structure {} not found", id)));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated fee structure".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<FeeStructure>> {
        let row = sqlx::query_as::<_, FeeRow>(
            r#"
            SELECT id, level, tuition_per_term, meals_fee, transport_fee, total_fee,
                   file, created_at, updated_at
            FROM fee_structures
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_fee).transpose()
    }

    async fn find_by_level(&self, level: SchoolLevel) -> Result<Option<FeeStructure>> {
        let row = sqlx::query_as::<_, FeeRow>(
            r#"
            SELECT id, level, tuition_per_term, meals_fee, transport_fee, total_fee,
                   file, created_at, updated_at
            FROM fee_structures
            WHERE level = ?
            "#
        )
        .bind(level.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_fee).transpose()
    }

    async fn list(&self) -> Result<Vec<FeeStructure>> {
        let rows = sqlx::query_as::<_, FeeRow>(
            r#"
            SELECT id, level, tuition_per_term, meals_fee, transport_fee, total_fee,
                   file, created_at, updated_at
            FROM fee_structures
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let mut fees = rows
            .into_iter()
            .map(Self::row_to_fee)
            .collect::<Result<Vec<_>>>()?;
        fees.sort_by_key(|fee| fee.level);
        Ok(fees)
    }
}
