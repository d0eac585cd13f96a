// Prompt constants for the advice chat flow.
// Each flow that calls the model defines its own prompts.rs alongside it.

/// Advice prompt template. Replace `{context}` and `{question}` before
/// sending.
pub const ADVICE_PROMPT_TEMPLATE: &str = "\
You are a friendly career advisor. Provide concise, actionable advice.

Context: {context}
User question: {question}

Give: 1) Short suggestion (1-2 lines). 2) Steps or resources (bullet points). \
3) Suggested skill improvements.";

/// Builds the advice prompt, optionally appending a word-count constraint
/// (configuration-time policy, not caller input). Inputs are not mutated.
pub fn build_advice_prompt(question: &str, context: &str, word_limit: Option<usize>) -> String {
    let mut prompt = ADVICE_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question);
    if let Some(limit) = word_limit {
        prompt.push_str(&format!("\nKeep the full answer under {limit} words."));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_question_and_context() {
        let prompt = build_advice_prompt("Should I learn Rust?", "5 years in QA", None);
        assert!(prompt.contains("User question: Should I learn Rust?"));
        assert!(prompt.contains("Context: 5 years in QA"));
    }

    #[test]
    fn test_word_limit_clause_is_appended_when_set() {
        let prompt = build_advice_prompt("q", "", Some(100));
        assert!(prompt.ends_with("Keep the full answer under 100 words."));
    }

    #[test]
    fn test_no_word_limit_clause_when_unset() {
        let prompt = build_advice_prompt("q", "", None);
        assert!(!prompt.contains("words."));
    }

    #[test]
    fn test_empty_context_still_renders() {
        let prompt = build_advice_prompt("q", "", None);
        assert!(prompt.contains("Context: \n"));
    }
}
