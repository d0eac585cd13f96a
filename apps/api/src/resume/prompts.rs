// Prompt constants for the resume review flow.
// Each flow that calls the model defines its own prompts.rs alongside it.

/// Review prompt template. Replace `{job_title}` and `{resume_text}` before
/// sending. The resume text must already be capped (see `build_review_prompt`).
pub const REVIEW_PROMPT_TEMPLATE: &str = "\
You are an expert resume reviewer and career coach.
Job title: {job_title}
Resume text:
{resume_text}

Provide:
1) Short ATS-style summary (2 lines).
2) Top 5 improvement suggestions prioritized.
3) Skills the candidate appears to be missing for this job title.
4) Short rewritten professional summary (2-3 lines) the candidate can use.
Be concise and action-oriented.";

/// Builds the review prompt, silently cutting the resume text at `char_cap`
/// characters to respect the model's context window. Inputs are not mutated.
pub fn build_review_prompt(resume_text: &str, job_title: &str, char_cap: usize) -> String {
    REVIEW_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{resume_text}", &truncate_chars(resume_text, char_cap))
}

/// Cuts at a char boundary so multi-byte text never splits mid-character.
fn truncate_chars(text: &str, cap: usize) -> String {
    text.chars().take(cap).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_job_title_and_text() {
        let prompt = build_review_prompt("My resume body", "Data Analyst", 4000);
        assert!(prompt.contains("Job title: Data Analyst"));
        assert!(prompt.contains("My resume body"));
    }

    #[test]
    fn test_oversized_text_is_cut_exactly_at_cap() {
        let resume = "x".repeat(5000);
        let prompt = build_review_prompt(&resume, "Data Analyst", 4000);
        let embedded_run = prompt.chars().filter(|c| *c == 'x').count();
        assert_eq!(embedded_run, 4000);
        // The caller's string is untouched.
        assert_eq!(resume.len(), 5000);
    }

    #[test]
    fn test_undersized_text_is_not_padded() {
        let prompt = build_review_prompt("short", "Analyst", 4000);
        assert!(prompt.contains("short\n"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
    }
}
