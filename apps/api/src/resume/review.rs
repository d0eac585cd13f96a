//! Qualitative LLM review of a scored resume.

use crate::llm_client::{invoke_or_sentinel, ModelInvoker};
use crate::resume::prompts::build_review_prompt;

/// Asks the model for qualitative feedback on a resume. Model failures come
/// back as a `[LLM ERROR]` sentinel string, never as an error value — the
/// heuristic score flow must not be dragged down by a dead model server.
pub async fn review_resume(
    model: &dyn ModelInvoker,
    resume_text: &str,
    job_title: &str,
    char_cap: usize,
) -> String {
    let prompt = build_review_prompt(resume_text, job_title, char_cap);
    invoke_or_sentinel(model, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{is_llm_error, LlmError};
    use async_trait::async_trait;

    struct EchoModel;

    #[async_trait]
    impl ModelInvoker for EchoModel {
        async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
            Ok(format!("reviewed: {}", prompt.len()))
        }
    }

    struct DeadModel;

    #[async_trait]
    impl ModelInvoker for DeadModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Unavailable { retries: 3 })
        }
    }

    #[tokio::test]
    async fn test_review_returns_model_reply() {
        let reply = review_resume(&EchoModel, "resume body", "Data Analyst", 4000).await;
        assert!(reply.starts_with("reviewed:"));
    }

    #[tokio::test]
    async fn test_dead_model_yields_sentinel_not_error() {
        let reply = review_resume(&DeadModel, "resume body", "Data Analyst", 4000).await;
        assert!(is_llm_error(&reply));
    }
}
