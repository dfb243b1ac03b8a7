/// Inference client — the single point of entry for remote text generation.
///
/// ARCHITECTURAL RULE: no other module calls the inference endpoint directly.
///
/// The public contract has no error variant. Every endpoint failure (cold
/// start, HTTP error, transport error, unusable reply) is folded into a
/// locally generated rewrite whose notes explain what happened. One attempt
/// is made per call; there is no retry loop.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::feedback::fallback::generate_fallback;
use crate::feedback::parser::truncate_chars;

/// Maximum characters of an underlying error echoed back to the user.
const ERROR_DETAIL_CHARS: usize = 100;

pub const WARMING_UP_NOTICE: &str = "⚠️ Modelo está carregando. Aguarde alguns segundos e tente \
novamente. Usando melhoria básica enquanto isso.";

#[derive(Debug, Error)]
enum InferenceError {
    #[error("model is loading")]
    WarmingUp,

    #[error("API error (status {status})")]
    Status { status: u16 },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

impl InferenceError {
    /// User-facing explanation placed in the notes of the fallback record.
    fn notice(&self) -> String {
        match self {
            InferenceError::WarmingUp => WARMING_UP_NOTICE.to_string(),
            InferenceError::Status { status } => format!(
                "⚠️ Erro na API ({status}). Usando melhoria básica. \
                 Configure HF_API_KEY para usar modelo completo."
            ),
            other => format!(
                "⚠️ Erro de conexão. Usando melhoria básica. Erro: {}",
                truncate_chars(&other.to_string(), ERROR_DETAIL_CHARS)
            ),
        }
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 1500,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

impl GenerationParameters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// Anything that can turn a prompt into raw model text.
/// Implementations never fail; degraded output is still output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParameters) -> String;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: RequestParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

/// The shapes the endpoint answers with. Batch items are decoded lazily so
/// only the first one has to be well formed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceReply {
    Batch(Vec<Value>),
    Single(GeneratedOutput),
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
struct GeneratedOutput {
    generated_text: Option<String>,
    text: Option<String>,
}

impl GeneratedOutput {
    fn into_text(self) -> Option<String> {
        self.generated_text.or(self.text)
    }
}

impl InferenceReply {
    /// First batch item, else the single object; `generated_text` before `text`.
    fn into_text(self) -> Option<String> {
        match self {
            InferenceReply::Batch(items) => {
                let first = items.into_iter().next()?;
                serde_json::from_value::<GeneratedOutput>(first)
                    .ok()?
                    .into_text()
            }
            InferenceReply::Single(output) => output.into_text(),
            InferenceReply::Unrecognized(value) => {
                debug!("Inference reply has no text field: {value}");
                None
            }
        }
    }
}

/// Connection settings for the remote endpoint, passed in explicitly.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            model_name: config.model_name.clone(),
            api_key: config.api_key.clone(),
            timeout: config.inference_timeout(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model_name)
    }
}

/// Remote text-generation client.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            endpoint: config.endpoint(),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Single attempt against the endpoint. Errors are classified, not handled.
    async fn call(
        &self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, InferenceError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: RequestParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
                return_full_text: false,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(InferenceError::WarmingUp);
        }
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Inference endpoint replied with {} bytes", body.len());

        let reply: InferenceReply = serde_json::from_str(&body)?;
        let text = reply.into_text().unwrap_or(body);

        if text.trim().is_empty() {
            return Err(InferenceError::EmptyContent);
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &str, params: &GenerationParameters) -> String {
        match self.call(prompt, params).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Inference call failed ({e}), serving local fallback");
                generate_fallback(prompt).with_notes(e.notice()).to_json()
            }
        }
    }
}

/// Local-inference placeholder. No on-device model is wired in yet, so every
/// call is answered by the rule-based fallback generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalModel;

#[async_trait]
impl TextGenerator for LocalModel {
    async fn generate(&self, prompt: &str, _params: &GenerationParameters) -> String {
        generate_fallback(prompt).to_json()
    }
}
