//! Persistence Gateway: the record store for profiles, routines and progress.
//!
//! Every operation is either an insert of a fully-built record (ids are
//! generated locally, so the caller already holds the id) or a
//! "latest by foreign key" read. `AppState` carries an `Arc<dyn PersistenceGateway>`:
//! `PgGateway` when `DATABASE_URL` is set, `InMemoryGateway` otherwise.

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub mod test_support;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::profile::SkinProfile;
use crate::models::progress::{CompletedStep, ProgressLog, SkinMetric};
use crate::models::routine::SkincareRoutine;

pub use memory::InMemoryGateway;
pub use postgres::PgGateway;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn insert_profile(&self, profile: &SkinProfile) -> Result<SkinProfile, PersistenceError>;

    /// Most recently created profile of the user.
    async fn latest_profile(&self, user_id: Uuid) -> Result<Option<SkinProfile>, PersistenceError>;

    async fn insert_routine(
        &self,
        routine: &SkincareRoutine,
    ) -> Result<SkincareRoutine, PersistenceError>;

    /// Most recently created routine generated from `skin_profile_id`.
    async fn latest_routine(
        &self,
        user_id: Uuid,
        skin_profile_id: Uuid,
    ) -> Result<Option<SkincareRoutine>, PersistenceError>;

    async fn progress_log_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ProgressLog>, PersistenceError>;

    /// Merges `step` into the user's log for `date`, creating the log when the
    /// day has none. Atomic per user and day; `new_log_id` is only used on creation.
    async fn upsert_progress_step(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        step: &CompletedStep,
    ) -> Result<ProgressLog, PersistenceError>;

    /// Sets notes and photo URL on the user's log for `date`, creating the log
    /// when the day has none. A `None` field keeps its stored value.
    async fn upsert_progress_entry(
        &self,
        new_log_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        notes: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<ProgressLog, PersistenceError>;

    async fn insert_metric(&self, metric: &SkinMetric) -> Result<SkinMetric, PersistenceError>;

    /// Newest first by date, then creation time.
    async fn recent_metrics(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SkinMetric>, PersistenceError>;
}
