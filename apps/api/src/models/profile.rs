use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skin::{parse_labels, Budget, SkinConcern, SkinType, UnknownVariant};

/// The answers of one quiz submission. Append-only: a new submission is a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    pub allergies: Vec<String>,
    pub budget: Budget,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkinProfile {
    /// Builds a profile with a locally generated id, stamped now.
    pub fn new(
        user_id: Uuid,
        skin_type: SkinType,
        skin_concerns: Vec<SkinConcern>,
        allergies: Vec<String>,
        budget: Budget,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            skin_type,
            skin_concerns,
            allergies,
            budget,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SkinProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skin_type: String,
    pub skin_concerns: Vec<String>,
    pub allergies: Vec<String>,
    pub budget: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SkinProfileRow> for SkinProfile {
    type Error = UnknownVariant;

    fn try_from(row: SkinProfileRow) -> Result<Self, Self::Error> {
        Ok(SkinProfile {
            id: row.id,
            user_id: row.user_id,
            skin_type: row.skin_type.parse()?,
            skin_concerns: parse_labels(&row.skin_concerns)?,
            allergies: row.allergies,
            budget: row.budget.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
