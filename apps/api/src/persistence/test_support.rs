use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::profile::SkinProfile;
use crate::models::progress::{CompletedStep, ProgressLog, SkinMetric};
use crate::models::routine::SkincareRoutine;
use crate::persistence::{InMemoryGateway, PersistenceError, PersistenceGateway};

fn down() -> PersistenceError {
    PersistenceError::Unavailable("connection refused".to_string())
}

/// A gateway whose every call fails, for exercising the degraded paths.
pub struct FailingGateway;

#[async_trait]
impl PersistenceGateway for FailingGateway {
    async fn insert_profile(&self, _: &SkinProfile) -> Result<SkinProfile, PersistenceError> {
        Err(down())
    }

    async fn latest_profile(&self, _: Uuid) -> Result<Option<SkinProfile>, PersistenceError> {
        Err(down())
    }

    async fn insert_routine(
        &self,
        _: &SkincareRoutine,
    ) -> Result<SkincareRoutine, PersistenceError> {
        Err(down())
    }

    async fn latest_routine(
        &self,
        _: Uuid,
        _: Uuid,
    ) -> Result<Option<SkincareRoutine>, PersistenceError> {
        Err(down())
    }

    async fn progress_log_for_date(
        &self,
        _: Uuid,
        _: NaiveDate,
    ) -> Result<Option<ProgressLog>, PersistenceError> {
        Err(down())
    }

    async fn upsert_progress_step(
        &self,
        _: Uuid,
        _: Uuid,
        _: NaiveDate,
        _: &CompletedStep,
    ) -> Result<ProgressLog, PersistenceError> {
        Err(down())
    }

    async fn upsert_progress_entry(
        &self,
        _: Uuid,
        _: Uuid,
        _: NaiveDate,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<ProgressLog, PersistenceError> {
        Err(down())
    }

    async fn insert_metric(&self, _: &SkinMetric) -> Result<SkinMetric, PersistenceError> {
        Err(down())
    }

    async fn recent_metrics(&self, _: Uuid, _: i64) -> Result<Vec<SkinMetric>, PersistenceError> {
        Err(down())
    }
}

/// In-memory store whose routine lookup always fails; every other call works.
#[derive(Default)]
pub struct RoutineLookupFails {
    pub inner: InMemoryGateway,
}

#[async_trait]
impl PersistenceGateway for RoutineLookupFails {
    async fn insert_profile(&self, profile: &SkinProfile) -> Result<SkinProfile, PersistenceError> {
        self.inner.insert_profile(profile).await
    }

    async fn latest_profile(&self, user_id: Uuid) -> Result<Option<SkinProfile>, PersistenceError> {
        self.inner.latest_profile(user_id).await
    }

    async fn insert_routine(
        &self,
        routine: &SkincareRoutine,
    ) -> Result<SkincareRoutine, PersistenceError> {
        self.inner.insert_routine(routine).await
    }

    async fn latest_routine(
        &self,
        _: Uuid,
        _: Uuid,
    ) -> Result<Option<SkincareRoutine>, PersistenceError> {
        Err(down())
    }

    async fn progress_log_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ProgressLog>, PersistenceError> {
        self.inner.progress_log_for_date(user_id, date).await
    }

    async fn upsert_progress_step(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        step: &CompletedStep,
    ) -> Result<ProgressLog, PersistenceError> {
        self.inner
            .upsert_progress_step(new_log_id, user_id, date, step)
            .await
    }

    async fn upsert_progress_entry(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        notes: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<ProgressLog, PersistenceError> {
        self.inner
            .upsert_progress_entry(new_log_id, user_id, date, notes, photo_url)
            .await
    }

    async fn insert_metric(&self, metric: &SkinMetric) -> Result<SkinMetric, PersistenceError> {
        self.inner.insert_metric(metric).await
    }

    async fn recent_metrics(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SkinMetric>, PersistenceError> {
        self.inner.recent_metrics(user_id, limit).await
    }
}
