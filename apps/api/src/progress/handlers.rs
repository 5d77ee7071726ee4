use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::flow::{resolve_state, LifecycleState};
use crate::lifecycle::handlers::UserIdQuery;
use crate::models::progress::{CompletedStep, ProgressLog, SkinMetric};
use crate::progress::entries::{save_entry, validate_entry, ProgressEntryInput};
use crate::progress::metrics::{metric_history, record_metrics, validate_metrics, MetricsInput};
use crate::progress::tracker::{
    checklist_summary, mark_step, validate_check_in, ChecklistSummary,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub log: Option<ProgressLog>,
    /// Absent until the user has a routine.
    pub checklist: Option<ChecklistSummary>,
}

/// GET /api/v1/progress/today
pub async fn handle_today(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TodayResponse>, AppError> {
    let today = Utc::now().date_naive();
    let log = state
        .gateway
        .progress_log_for_date(params.user_id, today)
        .await?;

    let checklist = match resolve_state(state.gateway.as_ref(), params.user_id).await? {
        LifecycleState::ProfileAndRoutine(_, routine) => {
            Some(checklist_summary(&routine, log.as_ref()))
        }
        LifecycleState::NoProfile | LifecycleState::ProfileOnly(_) => None,
    };

    Ok(Json(TodayResponse {
        date: today,
        log,
        checklist,
    }))
}

#[derive(Deserialize)]
pub struct MarkStepRequest {
    pub user_id: Uuid,
    pub routine_step_id: String,
    pub product_id: String,
    pub completed: bool,
    /// Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// POST /api/v1/progress/steps
pub async fn handle_mark_step(
    State(state): State<AppState>,
    Json(req): Json<MarkStepRequest>,
) -> Result<Json<ProgressLog>, AppError> {
    validate_check_in(&state.catalog, &req.routine_step_id, &req.product_id)?;

    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let step = CompletedStep {
        routine_step_id: req.routine_step_id,
        completed: req.completed,
        product_id: req.product_id,
    };
    let log = mark_step(state.gateway.as_ref(), req.user_id, date, step).await?;
    Ok(Json(log))
}

/// POST /api/v1/progress/entries
pub async fn handle_save_entry(
    State(state): State<AppState>,
    Json(req): Json<ProgressEntryInput>,
) -> Result<Json<ProgressLog>, AppError> {
    let entry = validate_entry(req)?;
    let log = save_entry(state.gateway.as_ref(), &entry).await?;
    Ok(Json(log))
}

/// POST /api/v1/metrics
pub async fn handle_record_metrics(
    State(state): State<AppState>,
    Json(req): Json<MetricsInput>,
) -> Result<(StatusCode, Json<SkinMetric>), AppError> {
    let metric = validate_metrics(&req)?;
    let stored = record_metrics(state.gateway.as_ref(), metric).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[derive(Deserialize)]
pub struct MetricsQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// GET /api/v1/metrics
pub async fn handle_metric_history(
    State(state): State<AppState>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<Vec<SkinMetric>>, AppError> {
    let history = metric_history(state.gateway.as_ref(), params.user_id, params.limit).await?;
    Ok(Json(history))
}
