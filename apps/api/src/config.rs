use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_MODEL_NAME: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct";
const DEFAULT_API_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_PROMPT_TEMPLATE_PATH: &str = "prompts/master_prompt.txt";

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_name: String,
    /// Bearer credential for the inference endpoint. Empty values are treated as unset.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub use_local_model: bool,
    pub prompt_template_path: PathBuf,
    pub inference_timeout_secs: u64,
    pub request_deadline_secs: u64,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            model_name: var_or("HF_MODEL_NAME", DEFAULT_MODEL_NAME),
            api_key: lookup("HF_API_KEY").filter(|k| !k.trim().is_empty()),
            api_base_url: var_or("HF_API_BASE_URL", DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            use_local_model: var_or("USE_LOCAL_MODEL", "false").eq_ignore_ascii_case("true"),
            prompt_template_path: PathBuf::from(var_or(
                "PROMPT_TEMPLATE_PATH",
                DEFAULT_PROMPT_TEMPLATE_PATH,
            )),
            inference_timeout_secs: var_or("INFERENCE_TIMEOUT_SECS", "60")
                .parse()
                .context("INFERENCE_TIMEOUT_SECS must be a whole number of seconds")?,
            request_deadline_secs: var_or("REQUEST_DEADLINE_SECS", "90")
                .parse()
                .context("REQUEST_DEADLINE_SECS must be a whole number of seconds")?,
            max_new_tokens: var_or("MAX_NEW_TOKENS", "1500")
                .parse()
                .context("MAX_NEW_TOKENS must be a positive integer")?,
            temperature: var_or("TEMPERATURE", "0.7")
                .parse()
                .context("TEMPERATURE must be a number")?,
            top_p: var_or("TOP_P", "0.9")
                .parse()
                .context("TOP_P must be a number")?,
            port: var_or("PORT", "7860")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }
}
