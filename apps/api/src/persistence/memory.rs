use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::profile::SkinProfile;
use crate::models::progress::{CompletedStep, ProgressLog, SkinMetric};
use crate::models::routine::SkincareRoutine;
use crate::persistence::{PersistenceError, PersistenceGateway};

#[derive(Default)]
struct Tables {
    profiles: Vec<SkinProfile>,
    routines: Vec<SkincareRoutine>,
    progress_logs: Vec<ProgressLog>,
    metrics: Vec<SkinMetric>,
}

impl Tables {
    /// The user's log for `date`, created empty when missing.
    fn day_log(&mut self, new_log_id: Uuid, user_id: Uuid, date: NaiveDate) -> &mut ProgressLog {
        let index = match self
            .progress_logs
            .iter()
            .position(|l| l.user_id == user_id && l.date == date)
        {
            Some(index) => index,
            None => {
                self.progress_logs
                    .push(ProgressLog::empty(new_log_id, user_id, date));
                self.progress_logs.len() - 1
            }
        };
        &mut self.progress_logs[index]
    }
}

/// Process-local record store. Used when no database is configured and in tests.
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryGateway {
    tables: Mutex<Tables>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, PersistenceError> {
        self.tables
            .lock()
            .map_err(|_| PersistenceError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn insert_profile(&self, profile: &SkinProfile) -> Result<SkinProfile, PersistenceError> {
        self.tables()?.profiles.push(profile.clone());
        Ok(profile.clone())
    }

    async fn latest_profile(&self, user_id: Uuid) -> Result<Option<SkinProfile>, PersistenceError> {
        // max_by_key keeps the last of equal keys, so ties go to the newest insert
        Ok(self
            .tables()?
            .profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn insert_routine(
        &self,
        routine: &SkincareRoutine,
    ) -> Result<SkincareRoutine, PersistenceError> {
        self.tables()?.routines.push(routine.clone());
        Ok(routine.clone())
    }

    async fn latest_routine(
        &self,
        user_id: Uuid,
        skin_profile_id: Uuid,
    ) -> Result<Option<SkincareRoutine>, PersistenceError> {
        Ok(self
            .tables()?
            .routines
            .iter()
            .filter(|r| r.user_id == user_id && r.skin_profile_id == skin_profile_id)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn progress_log_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ProgressLog>, PersistenceError> {
        Ok(self
            .tables()?
            .progress_logs
            .iter()
            .find(|log| log.user_id == user_id && log.date == date)
            .cloned())
    }

    async fn upsert_progress_step(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        step: &CompletedStep,
    ) -> Result<ProgressLog, PersistenceError> {
        let mut tables = self.tables()?;
        let log = tables.day_log(new_log_id, user_id, date);
        log.apply_step(step.clone());
        log.updated_at = Utc::now();
        Ok(log.clone())
    }

    async fn upsert_progress_entry(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        notes: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<ProgressLog, PersistenceError> {
        let mut tables = self.tables()?;
        let log = tables.day_log(new_log_id, user_id, date);
        if let Some(notes) = notes {
            log.notes = Some(notes.to_string());
        }
        if let Some(url) = photo_url {
            log.photo_url = Some(url.to_string());
        }
        log.updated_at = Utc::now();
        Ok(log.clone())
    }

    async fn insert_metric(&self, metric: &SkinMetric) -> Result<SkinMetric, PersistenceError> {
        self.tables()?.metrics.push(metric.clone());
        Ok(metric.clone())
    }

    async fn recent_metrics(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SkinMetric>, PersistenceError> {
        let mut metrics: Vec<SkinMetric> = self
            .tables()?
            .metrics
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        metrics.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        metrics.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skin::{Budget, SkinConcern, SkinType};
    use chrono::Duration;

    fn profile(user_id: Uuid) -> SkinProfile {
        SkinProfile::new(user_id, SkinType::Oily, vec![SkinConcern::Acne], vec![], Budget::Low)
    }

    #[tokio::test]
    async fn test_latest_profile_is_newest_for_user() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        let first = profile(user);
        let mut second = profile(user);
        second.created_at = first.created_at + Duration::seconds(5);
        gateway.insert_profile(&first).await.unwrap();
        gateway.insert_profile(&second).await.unwrap();
        gateway.insert_profile(&profile(other)).await.unwrap();

        let latest = gateway.latest_profile(user).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(gateway.latest_profile(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_equal_timestamps_resolve_to_last_insert() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let first = profile(user);
        let mut second = profile(user);
        second.created_at = first.created_at;
        gateway.insert_profile(&first).await.unwrap();
        gateway.insert_profile(&second).await.unwrap();

        let latest = gateway.latest_profile(user).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    fn step(id: &str, completed: bool) -> CompletedStep {
        CompletedStep {
            routine_step_id: id.to_string(),
            completed,
            product_id: "c1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_step_upsert_keeps_one_log_per_day() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let today = Utc::now().date_naive();

        let first = gateway
            .upsert_progress_step(Uuid::new_v4(), user, today, &step("morning-1", true))
            .await
            .unwrap();
        let second = gateway
            .upsert_progress_step(Uuid::new_v4(), user, today, &step("morning-2", true))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.completed_steps.len(), 2);
        let stored = gateway.progress_log_for_date(user, today).await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_entry_upsert_keeps_unset_fields_and_steps() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let today = Utc::now().date_naive();

        gateway
            .upsert_progress_step(Uuid::new_v4(), user, today, &step("evening-1", true))
            .await
            .unwrap();
        gateway
            .upsert_progress_entry(Uuid::new_v4(), user, today, Some("calm skin"), None)
            .await
            .unwrap();
        let log = gateway
            .upsert_progress_entry(
                Uuid::new_v4(),
                user,
                today,
                None,
                Some("https://cdn.example.com/p.jpg"),
            )
            .await
            .unwrap();

        assert_eq!(log.notes.as_deref(), Some("calm skin"));
        assert_eq!(log.photo_url.as_deref(), Some("https://cdn.example.com/p.jpg"));
        assert_eq!(log.completed_steps.len(), 1);
    }
}
