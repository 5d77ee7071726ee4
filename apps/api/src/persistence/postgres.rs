use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{SkinProfile, SkinProfileRow};
use crate::models::progress::{
    CompletedStep, ProgressLog, ProgressLogRow, SkinMetric, SkinMetricRow,
};
use crate::models::routine::{SkincareRoutine, SkincareRoutineRow};
use crate::persistence::{PersistenceError, PersistenceGateway};

/// PostgreSQL-backed gateway. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn labels<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn decode_profile(row: SkinProfileRow) -> Result<SkinProfile, PersistenceError> {
    SkinProfile::try_from(row).map_err(|e| PersistenceError::Decode(e.to_string()))
}

fn decode_metric(row: SkinMetricRow) -> Result<SkinMetric, PersistenceError> {
    SkinMetric::try_from(row).map_err(PersistenceError::Decode)
}

#[async_trait]
impl PersistenceGateway for PgGateway {
    async fn insert_profile(&self, profile: &SkinProfile) -> Result<SkinProfile, PersistenceError> {
        let row = sqlx::query_as::<_, SkinProfileRow>(
            r#"
            INSERT INTO skin_profiles
                (id, user_id, skin_type, skin_concerns, allergies, budget, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(profile.skin_type.as_str())
        .bind(labels(&profile.skin_concerns))
        .bind(&profile.allergies)
        .bind(profile.budget.as_str())
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        decode_profile(row)
    }

    async fn latest_profile(&self, user_id: Uuid) -> Result<Option<SkinProfile>, PersistenceError> {
        let row = sqlx::query_as::<_, SkinProfileRow>(
            "SELECT * FROM skin_profiles WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_profile).transpose()
    }

    async fn insert_routine(
        &self,
        routine: &SkincareRoutine,
    ) -> Result<SkincareRoutine, PersistenceError> {
        let row = sqlx::query_as::<_, SkincareRoutineRow>(
            r#"
            INSERT INTO skincare_routines
                (id, user_id, skin_profile_id, morning_routine, evening_routine,
                 weekly_routine, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(routine.id)
        .bind(routine.user_id)
        .bind(routine.skin_profile_id)
        .bind(Json(&routine.morning_routine))
        .bind(Json(&routine.evening_routine))
        .bind(Json(&routine.weekly_routine))
        .bind(routine.created_at)
        .bind(routine.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn latest_routine(
        &self,
        user_id: Uuid,
        skin_profile_id: Uuid,
    ) -> Result<Option<SkincareRoutine>, PersistenceError> {
        let row = sqlx::query_as::<_, SkincareRoutineRow>(
            r#"
            SELECT * FROM skincare_routines
            WHERE user_id = $1 AND skin_profile_id = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(skin_profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn progress_log_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ProgressLog>, PersistenceError> {
        let row = sqlx::query_as::<_, ProgressLogRow>(
            "SELECT * FROM progress_logs WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert_progress_step(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        step: &CompletedStep,
    ) -> Result<ProgressLog, PersistenceError> {
        // The conflict arm locks the day's row, so concurrent check-ins merge
        // one after another instead of overwriting each other's array.
        let row = sqlx::query_as::<_, ProgressLogRow>(
            r#"
            INSERT INTO progress_logs
                (id, user_id, date, completed_steps, created_at, updated_at)
            VALUES ($1, $2, $3, jsonb_build_array($4::jsonb), $5, $5)
            ON CONFLICT (user_id, date) DO UPDATE SET
                completed_steps = CASE
                    WHEN EXISTS (
                        SELECT 1
                        FROM jsonb_array_elements(progress_logs.completed_steps) AS s(step)
                        WHERE s.step->>'routine_step_id' = $6
                    )
                    THEN (
                        SELECT jsonb_agg(
                            CASE WHEN s.step->>'routine_step_id' = $6
                                 THEN $4::jsonb
                                 ELSE s.step
                            END
                            ORDER BY s.pos
                        )
                        FROM jsonb_array_elements(progress_logs.completed_steps)
                             WITH ORDINALITY AS s(step, pos)
                    )
                    ELSE progress_logs.completed_steps || jsonb_build_array($4::jsonb)
                END,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(new_log_id)
        .bind(user_id)
        .bind(date)
        .bind(Json(step))
        .bind(Utc::now())
        .bind(&step.routine_step_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn upsert_progress_entry(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        notes: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<ProgressLog, PersistenceError> {
        let row = sqlx::query_as::<_, ProgressLogRow>(
            r#"
            INSERT INTO progress_logs
                (id, user_id, date, completed_steps, notes, photo_url, created_at, updated_at)
            VALUES ($1, $2, $3, '[]'::jsonb, $4, $5, $6, $6)
            ON CONFLICT (user_id, date) DO UPDATE SET
                notes = COALESCE(EXCLUDED.notes, progress_logs.notes),
                photo_url = COALESCE(EXCLUDED.photo_url, progress_logs.photo_url),
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(new_log_id)
        .bind(user_id)
        .bind(date)
        .bind(notes)
        .bind(photo_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn insert_metric(&self, metric: &SkinMetric) -> Result<SkinMetric, PersistenceError> {
        let row = sqlx::query_as::<_, SkinMetricRow>(
            r#"
            INSERT INTO skin_metrics (
                id, user_id, date, hydration_level, oiliness, redness, texture, overall,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(metric.id)
        .bind(metric.user_id)
        .bind(metric.date)
        .bind(metric.hydration_level.map(i16::from))
        .bind(metric.oiliness.map(i16::from))
        .bind(metric.redness.map(i16::from))
        .bind(metric.texture.map(i16::from))
        .bind(metric.overall.map(i16::from))
        .bind(metric.created_at)
        .fetch_one(&self.pool)
        .await?;

        decode_metric(row)
    }

    async fn recent_metrics(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SkinMetric>, PersistenceError> {
        let rows = sqlx::query_as::<_, SkinMetricRow>(
            r#"
            SELECT * FROM skin_metrics
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(decode_metric).collect()
    }
}
