use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FieldErrors, Result};

/// Largest amount a fee column holds (ten digits, two of them decimals).
fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchoolLevel {
    #[serde(rename = "Play Group")]
    PlayGroup,
    #[serde(rename = "PP1 - PP2")]
    PrePrimary,
    #[serde(rename = "Grade 1 - 3")]
    LowerPrimary,
    #[serde(rename = "Grade 4 - 6")]
    UpperPrimary,
    #[serde(rename = "Junior Secondary")]
    JuniorSecondary,
}

impl SchoolLevel {
    pub const ALL: [SchoolLevel; 5] = [
        SchoolLevel::PlayGroup,
        SchoolLevel::PrePrimary,
        SchoolLevel::LowerPrimary,
        SchoolLevel::UpperPrimary,
        SchoolLevel::JuniorSecondary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolLevel::PlayGroup => "Play Group",
            SchoolLevel::PrePrimary => "PP1 - PP2",
            SchoolLevel::LowerPrimary => "Grade 1 - 3",
            SchoolLevel::UpperPrimary => "Grade 4 - 6",
            SchoolLevel::JuniorSecondary => "Junior Secondary",
        }
    }
}

impl FromStr for SchoolLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        SchoolLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid school level: {}", s)))
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-term fee components in KES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAmounts {
    pub tuition_per_term: Decimal,
    pub meals_fee: Decimal,
    pub transport_fee: Decimal,
}

impl FeeAmounts {
    pub fn total(&self) -> Decimal {
        self.tuition_per_term + self.meals_fee + self.transport_fee
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        for (field, amount) in [
            ("tuition_per_term", self.tuition_per_term),
            ("meals_fee", self.meals_fee),
            ("transport_fee", self.transport_fee),
        ] {
            if amount < Decimal::ZERO {
                errors.entry(field.to_string()).or_default().push("Amount cannot be negative.".to_string());
            }
            if amount.normalize().scale() > 2 {
                errors.entry(field.to_string()).or_default()
                    .push("Ensure that there are no more than 2 decimal places.".to_string());
            }
            if amount > max_amount() {
                errors.entry(field.to_string()).or_default()
                    .push("Ensure that there are no more than 10 digits in total.".to_string());
            }
        }
        if errors.is_empty() && self.total() > max_amount() {
            errors.insert(
                "total_fee".to_string(),
                vec!["Ensure that there are no more than 10 digits in total.".to_string()],
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Rounds to cents and pins the scale so amounts always print with two decimals.
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeStructure {
    pub id: i64,
    pub level: SchoolLevel,
    pub amounts: FeeAmounts,
    /// Always `amounts.total()`; written by the repository on every save.
    pub total_fee: Decimal,
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a fee structure. The total is derived from
/// `amounts` on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStructureInput {
    pub level: SchoolLevel,
    #[serde(flatten)]
    pub amounts: FeeAmounts,
    pub file: Option<String>,
}
