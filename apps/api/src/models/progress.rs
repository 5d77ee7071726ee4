use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedStep {
    pub routine_step_id: String,
    pub completed: bool,
    pub product_id: String,
}

/// One user's checklist for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub completed_steps: Vec<CompletedStep>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressLog {
    /// An empty log for `date`, stamped now.
    pub fn empty(id: Uuid, user_id: Uuid, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            date,
            completed_steps: Vec::new(),
            notes: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the entry for the same step id in place, or appends a new one.
    pub fn apply_step(&mut self, step: CompletedStep) {
        match self
            .completed_steps
            .iter_mut()
            .find(|s| s.routine_step_id == step.routine_step_id)
        {
            Some(existing) => *existing = step,
            None => self.completed_steps.push(step),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProgressLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub completed_steps: Json<Vec<CompletedStep>>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProgressLogRow> for ProgressLog {
    fn from(row: ProgressLogRow) -> Self {
        ProgressLog {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            completed_steps: row.completed_steps.0,
            notes: row.notes,
            photo_url: row.photo_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Self-reported skin condition. Every value is a percentage in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinMetric {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub hydration_level: Option<u8>,
    pub oiliness: Option<u8>,
    pub redness: Option<u8>,
    pub texture: Option<u8>,
    pub overall: Option<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SkinMetricRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub hydration_level: Option<i16>,
    pub oiliness: Option<i16>,
    pub redness: Option<i16>,
    pub texture: Option<i16>,
    pub overall: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SkinMetricRow> for SkinMetric {
    type Error = String;

    fn try_from(row: SkinMetricRow) -> Result<Self, Self::Error> {
        fn narrow(name: &str, value: Option<i16>) -> Result<Option<u8>, String> {
            value
                .map(|v| u8::try_from(v).map_err(|_| format!("{name} out of range: {v}")))
                .transpose()
        }

        Ok(SkinMetric {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            hydration_level: narrow("hydration_level", row.hydration_level)?,
            oiliness: narrow("oiliness", row.oiliness)?,
            redness: narrow("redness", row.redness)?,
            texture: narrow("texture", row.texture)?,
            overall: narrow("overall", row.overall)?,
            created_at: row.created_at,
        })
    }
}
