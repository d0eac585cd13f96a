pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advice::handlers as advice;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career advice chat
        .route("/api/v1/advice", post(advice::handle_advice))
        // Resume scoring & review
        .route("/api/v1/resume/score", post(resume::handle_score))
        .route("/api/v1/resume/analyze", post(resume::handle_analyze))
        .with_state(state)
}
