// Career advice chat flow: prompt building plus the model round-trip.

pub mod handlers;
pub mod prompts;

use crate::advice::prompts::build_advice_prompt;
use crate::llm_client::{invoke_or_sentinel, ModelInvoker};

/// Answers an open-ended career question. A model failure degrades to a
/// `[LLM ERROR]` sentinel string in the reply, never an error value.
pub async fn get_career_advice(
    model: &dyn ModelInvoker,
    question: &str,
    context: &str,
    word_limit: Option<usize>,
) -> String {
    let prompt = build_advice_prompt(question, context, word_limit);
    invoke_or_sentinel(model, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{is_llm_error, LlmError};
    use async_trait::async_trait;

    struct CannedModel(&'static str);

    #[async_trait]
    impl ModelInvoker for CannedModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct DeadModel;

    #[async_trait]
    impl ModelInvoker for DeadModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_advice_returns_model_reply() {
        let model = CannedModel("Apply to three roles a week.");
        let reply = get_career_advice(&model, "How do I find a job?", "", Some(100)).await;
        assert_eq!(reply, "Apply to three roles a week.");
    }

    #[tokio::test]
    async fn test_dead_model_yields_sentinel() {
        let reply = get_career_advice(&DeadModel, "How do I find a job?", "", None).await;
        assert!(is_llm_error(&reply));
    }
}
