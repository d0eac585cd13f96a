use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every knob has a default so the service starts with an empty environment;
/// a local Ollama install on the default port is assumed unless overridden.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_url: String,
    pub ollama_model: String,
    pub job_keywords_path: String,
    pub llm_timeout_secs: u64,
    /// Word-count instruction appended to advice prompts. 0 disables it.
    pub advice_word_limit: usize,
    /// Resume text is cut at this many chars before embedding in the review prompt.
    pub review_char_cap: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "mistral"),
            job_keywords_path: env_or("JOB_KEYWORDS_PATH", "data/job_keywords.json"),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            advice_word_limit: env_or("ADVICE_WORD_LIMIT", "100")
                .parse::<usize>()
                .context("ADVICE_WORD_LIMIT must be a non-negative integer")?,
            review_char_cap: env_or("REVIEW_CHAR_CAP", "4000")
                .parse::<usize>()
                .context("REVIEW_CHAR_CAP must be a non-negative integer")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
