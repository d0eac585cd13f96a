use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::LLM_ERROR_PREFIX;
use crate::resume::extract::extract_text;
use crate::resume::normalize::clean_text;
use crate::resume::review::review_resume;
use crate::resume::scoring::{compute_ats_score, ScoreReport, ScoreWeights};
use crate::state::AppState;

/// Anything shorter than this after normalization is not worth scoring.
const MIN_RESUME_CHARS: usize = 30;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub score: ScoreReport,
    /// Qualitative model feedback; `[LLM ERROR] …` when the model call failed.
    pub review: String,
}

/// Multipart fields accepted by the resume endpoints: an optional `file`
/// (the declared filename drives extension sniffing), optional pasted
/// `text`, and a required `job_title`.
struct ResumeSubmission {
    file: Option<(String, Bytes)>,
    pasted: Option<String>,
    job_title: String,
}

/// POST /api/v1/resume/score — heuristic ATS score only; no model call.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreReport>, AppError> {
    let submission = read_submission(multipart).await?;
    let resume_text = submission.resume_text()?;
    Ok(Json(compute_ats_score(
        &resume_text,
        &submission.job_title,
        &state.taxonomy,
        &ScoreWeights::default(),
    )))
}

/// POST /api/v1/resume/analyze — ATS score plus qualitative model review.
/// A model failure surfaces inside `review`, never as an HTTP error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let submission = read_submission(multipart).await?;
    let resume_text = submission.resume_text()?;

    let score = compute_ats_score(
        &resume_text,
        &submission.job_title,
        &state.taxonomy,
        &ScoreWeights::default(),
    );
    let review = review_resume(
        state.llm.as_ref(),
        &resume_text,
        &submission.job_title,
        state.config.review_char_cap,
    )
    .await;
    if review.starts_with(LLM_ERROR_PREFIX) {
        tracing::warn!("analyze completed with degraded review: {review}");
    }

    Ok(Json(AnalyzeResponse { score, review }))
}

async fn read_submission(mut multipart: Multipart) -> Result<ResumeSubmission, AppError> {
    let mut file = None;
    let mut pasted = None;
    let mut job_title = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("resume.txt").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Upload(format!("failed to read upload: {e}")))?;
                file = Some((filename, data));
            }
            "text" => {
                pasted = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Upload(format!("failed to read text field: {e}")))?,
                );
            }
            "job_title" => {
                job_title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Upload(format!("failed to read job title: {e}")))?,
                );
            }
            other => {
                tracing::debug!("ignoring unexpected multipart field '{other}'");
            }
        }
    }

    let job_title = job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("job_title is required".to_string()))?;

    Ok(ResumeSubmission {
        file,
        pasted,
        job_title,
    })
}

impl ResumeSubmission {
    /// Extracted upload and pasted text joined (pasted last), normalized,
    /// then gated on a minimum usable length.
    fn resume_text(&self) -> Result<String, AppError> {
        let mut text = match &self.file {
            Some((filename, data)) => extract_text(filename, data),
            None => String::new(),
        };
        if let Some(pasted) = self.pasted.as_deref().map(str::trim) {
            if !pasted.is_empty() {
                if text.is_empty() {
                    text = pasted.to_string();
                } else {
                    text = format!("{text}\n\n{pasted}");
                }
            }
        }
        let text = clean_text(&text);

        if text.chars().count() < MIN_RESUME_CHARS {
            return Err(AppError::Validation(
                "Please upload or paste a longer resume (at least a few lines).".to_string(),
            ));
        }
        Ok(text)
    }
}
