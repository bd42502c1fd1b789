pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

/// Upper bound for multipart resume uploads.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview Prep API
        .route("/api/interview-prep", post(handlers::handle_interview_prep))
        .route(
            "/api/interview-prep/upload",
            post(handlers::handle_interview_prep_upload)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/interviews", get(handlers::handle_list_interviews))
        .route("/api/interviews/:id", get(handlers::handle_get_interview))
        .with_state(state)
}
