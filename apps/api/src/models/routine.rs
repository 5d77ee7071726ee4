use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::product::Product;
use crate::models::skin::{Frequency, ProductCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutinePhase {
    Morning,
    Evening,
    Weekly,
}

impl RoutinePhase {
    pub const ALL: [RoutinePhase; 3] = [
        RoutinePhase::Morning,
        RoutinePhase::Evening,
        RoutinePhase::Weekly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutinePhase::Morning => "morning",
            RoutinePhase::Evening => "evening",
            RoutinePhase::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineStep {
    /// Fixed template position. Gaps are left where a slot had no candidate.
    pub order: u32,
    pub product_id: String,
    pub product: Product,
    pub frequency: Frequency,
    pub instructions: Option<String>,
}

impl RoutineStep {
    pub fn category(&self) -> ProductCategory {
        self.product.category
    }
}

/// Stable address of a step, e.g. `morning-3`. Survives regeneration because
/// order numbers belong to the template, not to the populated steps.
pub fn step_id(phase: RoutinePhase, order: u32) -> String {
    format!("{}-{}", phase.as_str(), order)
}

/// Inverse of [`step_id`]. Rejects unknown phases and order 0.
pub fn parse_step_id(id: &str) -> Option<(RoutinePhase, u32)> {
    let (phase, order) = id.split_once('-')?;
    let phase = RoutinePhase::ALL.into_iter().find(|p| p.as_str() == phase)?;
    let order: u32 = order.parse().ok()?;
    (order > 0).then_some((phase, order))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkincareRoutine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skin_profile_id: Uuid,
    pub morning_routine: Vec<RoutineStep>,
    pub evening_routine: Vec<RoutineStep>,
    pub weekly_routine: Vec<RoutineStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkincareRoutine {
    pub fn steps(&self, phase: RoutinePhase) -> &[RoutineStep] {
        match phase {
            RoutinePhase::Morning => &self.morning_routine,
            RoutinePhase::Evening => &self.evening_routine,
            RoutinePhase::Weekly => &self.weekly_routine,
        }
    }

    pub fn step_count(&self) -> usize {
        self.morning_routine.len() + self.evening_routine.len() + self.weekly_routine.len()
    }
}

/// Storage shape: each phase is a JSONB array of steps with products embedded.
#[derive(Debug, Clone, FromRow)]
pub struct SkincareRoutineRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skin_profile_id: Uuid,
    pub morning_routine: Json<Vec<RoutineStep>>,
    pub evening_routine: Json<Vec<RoutineStep>>,
    pub weekly_routine: Json<Vec<RoutineStep>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkincareRoutineRow> for SkincareRoutine {
    fn from(row: SkincareRoutineRow) -> Self {
        SkincareRoutine {
            id: row.id,
            user_id: row.user_id,
            skin_profile_id: row.skin_profile_id,
            morning_routine: row.morning_routine.0,
            evening_routine: row.evening_routine.0,
            weekly_routine: row.weekly_routine.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
