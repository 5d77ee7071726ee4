pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::lifecycle::handlers as lifecycle;
use crate::progress::handlers as progress;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog and recommendations
        .route("/api/v1/catalog", get(recommendation::handle_list_catalog))
        .route(
            "/api/v1/recommendations/preview",
            post(recommendation::handle_preview),
        )
        // Profile / routine lifecycle
        .route("/api/v1/quiz", post(lifecycle::handle_submit_quiz))
        .route("/api/v1/profile", get(lifecycle::handle_get_profile))
        .route("/api/v1/routine", get(lifecycle::handle_get_routine))
        .route(
            "/api/v1/routine/regenerate",
            post(lifecycle::handle_regenerate_routine),
        )
        // Progress tracking
        .route("/api/v1/progress/today", get(progress::handle_today))
        .route("/api/v1/progress/steps", post(progress::handle_mark_step))
        .route("/api/v1/progress/entries", post(progress::handle_save_entry))
        .route(
            "/api/v1/metrics",
            post(progress::handle_record_metrics).get(progress::handle_metric_history),
        )
        .with_state(state)
}
