use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::progress::SkinMetric;
use crate::persistence::{PersistenceError, PersistenceGateway};

pub const DEFAULT_HISTORY_LIMIT: i64 = 30;
const MAX_HISTORY_LIMIT: i64 = 365;
const MAX_METRIC_VALUE: i32 = 100;

/// Metric values as submitted. Wider than `u8` so out-of-range input reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsInput {
    pub user_id: Uuid,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub hydration_level: Option<i32>,
    #[serde(default)]
    pub oiliness: Option<i32>,
    #[serde(default)]
    pub redness: Option<i32>,
    #[serde(default)]
    pub texture: Option<i32>,
    #[serde(default)]
    pub overall: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsValidationError {
    #[error("At least one skin metric must be provided")]
    Empty,

    #[error("{field} must be between 0 and {MAX_METRIC_VALUE}, got {value}")]
    OutOfRange { field: &'static str, value: i32 },
}

fn percentage(
    field: &'static str,
    value: Option<i32>,
) -> Result<Option<u8>, MetricsValidationError> {
    match value {
        None => Ok(None),
        Some(v) if (0..=MAX_METRIC_VALUE).contains(&v) => {
            u8::try_from(v)
                .map(Some)
                .map_err(|_| MetricsValidationError::OutOfRange { field, value: v })
        }
        Some(v) => Err(MetricsValidationError::OutOfRange { field, value: v }),
    }
}

/// Builds a metric record, defaulting the date to today (UTC).
pub fn validate_metrics(input: &MetricsInput) -> Result<SkinMetric, MetricsValidationError> {
    let metric = SkinMetric {
        id: Uuid::new_v4(),
        user_id: input.user_id,
        date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
        hydration_level: percentage("hydration_level", input.hydration_level)?,
        oiliness: percentage("oiliness", input.oiliness)?,
        redness: percentage("redness", input.redness)?,
        texture: percentage("texture", input.texture)?,
        overall: percentage("overall", input.overall)?,
        created_at: Utc::now(),
    };

    let any_present = [
        metric.hydration_level,
        metric.oiliness,
        metric.redness,
        metric.texture,
        metric.overall,
    ]
    .iter()
    .any(Option::is_some);

    if any_present {
        Ok(metric)
    } else {
        Err(MetricsValidationError::Empty)
    }
}

/// Requested history length, clamped to `1..=365`.
pub fn clamp_history_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

pub async fn record_metrics(
    gateway: &dyn PersistenceGateway,
    metric: SkinMetric,
) -> Result<SkinMetric, PersistenceError> {
    let stored = gateway.insert_metric(&metric).await?;
    info!("Recorded skin metrics {} for user {}", stored.id, stored.user_id);
    Ok(stored)
}

pub async fn metric_history(
    gateway: &dyn PersistenceGateway,
    user_id: Uuid,
    requested_limit: Option<i64>,
) -> Result<Vec<SkinMetric>, PersistenceError> {
    gateway
        .recent_metrics(user_id, clamp_history_limit(requested_limit))
        .await
}
