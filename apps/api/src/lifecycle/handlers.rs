use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::flow::{regenerate_routine, submit_quiz, view_routine, RoutineOutcome};
use crate::lifecycle::validation::{validate_quiz, QuizSubmission};
use crate::models::profile::SkinProfile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RegenerateRequest {
    pub user_id: Uuid,
}

/// POST /api/v1/quiz
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizSubmission>,
) -> Result<(StatusCode, Json<RoutineOutcome>), AppError> {
    let quiz = validate_quiz(req)?;
    let mut picker = state.picker();
    let outcome = submit_quiz(state.gateway.as_ref(), &state.catalog, &mut picker, quiz).await;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SkinProfile>, AppError> {
    let profile = state
        .gateway
        .latest_profile(params.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No skin profile found for user {}", params.user_id))
        })?;
    Ok(Json(profile))
}

/// GET /api/v1/routine
pub async fn handle_get_routine(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RoutineOutcome>, AppError> {
    let mut picker = state.picker();
    let outcome = view_routine(
        state.gateway.as_ref(),
        &state.catalog,
        &mut picker,
        params.user_id,
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/routine/regenerate
pub async fn handle_regenerate_routine(
    State(state): State<AppState>,
    Json(req): Json<RegenerateRequest>,
) -> Result<(StatusCode, Json<RoutineOutcome>), AppError> {
    let mut picker = state.picker();
    let outcome = regenerate_routine(
        state.gateway.as_ref(),
        &state.catalog,
        &mut picker,
        req.user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
