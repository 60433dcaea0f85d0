use std::sync::Arc;

use crate::{
    domain::{FeeStructure, FeeStructureInput, SchoolLevel},
    error::{AppError, Result},
    repository::FeeRepository,
};

/// Fee schedules; the stored total is always recomputed from the components.
pub struct FeeService {
    repo: Arc<dyn FeeRepository>,
}

impl FeeService {
    pub fn new(repo: Arc<dyn FeeRepository>) -> Self {
        Self { repo }
    }

    /// Ordered by school level.
    pub async fn list(&self) -> Result<Vec<FeeStructure>> {
        self.repo.list().await
    }

    pub async fn get_by_level(&self, level: SchoolLevel) -> Result<Option<FeeStructure>> {
        self.repo.find_by_level(level).await
    }

    pub async fn create(&self, input: FeeStructureInput) -> Result<FeeStructure> {
        input.amounts.validate()?;
        if self.get_by_level(input.level).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Fee structure for {} already exists",
                input.level
            )));
        }
        let fee = self.repo.create(input).await?;
        tracing::info!(fee_id = fee.id, level = %fee.level, total = %fee.total_fee, "Fee structure created");
        Ok(fee)
    }

    pub async fn update(&self, id: i64, input: FeeStructureInput) -> Result<FeeStructure> {
        input.amounts.validate()?;
        if let Some(existing) = self.get_by_level(input.level).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Fee structure for {} already exists",
                    input.level
                )));
            }
        }
        let fee = self.repo.update(id, input).await?;
        tracing::info!(fee_id = fee.id, level = %fee.level, total = %fee.total_fee, "Fee structure updated");
        Ok(fee)
    }

    /// Creates the level's fee structure, or replaces it if one exists.
    pub async fn upsert(&self, input: FeeStructureInput) -> Result<FeeStructure> {
        match self.get_by_level(input.level).await? {
            Some(existing) => self.update(existing.id, input).await,
            None => self.create(input).await,
        }
    }
}
