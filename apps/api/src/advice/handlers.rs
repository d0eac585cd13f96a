use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::advice::get_career_advice;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub question: String,
    /// Optional free-text background the advisor should take into account.
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    /// Model reply; `[LLM ERROR] …` when the model call failed.
    pub advice: String,
}

/// POST /api/v1/advice
pub async fn handle_advice(
    State(state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("Please enter a question.".to_string()));
    }

    let word_limit =
        (state.config.advice_word_limit > 0).then_some(state.config.advice_word_limit);
    let advice =
        get_career_advice(state.llm.as_ref(), &req.question, &req.context, word_limit).await;

    Ok(Json(AdviceResponse { advice }))
}
