//! Feedback pipeline — validate → sanitize → build prompt → generate →
//! parse → format.
//!
//! Validation failures stop the pipeline before any remote call. Every
//! later stage degrades instead of failing, so the only other error is the
//! caller's deadline.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::feedback::formatter::{copy_text, format_output, FormattedFeedback};
use crate::feedback::parser::parse_response;
use crate::feedback::prompt_builder::PromptBuilder;
use crate::feedback::sanitize::sanitize_text;
use crate::feedback::validation::{FeedbackRequest, ValidationError};
use crate::llm_client::{GenerationParameters, TextGenerator};
use crate::models::feedback::ParsedRecord;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("tempo limite de {0:?} excedido")]
    DeadlineExceeded(Duration),
}

/// The five strings handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackOutput {
    pub enhanced: String,
    pub short_version: String,
    pub fis: String,
    pub suggestions: String,
    pub copy_text: String,
}

impl FeedbackOutput {
    /// The message in the first slot, every other slot empty.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            enhanced: message.into(),
            short_version: String::new(),
            fis: String::new(),
            suggestions: String::new(),
            copy_text: String::new(),
        }
    }
}

/// Record plus its formatted projection, for structured callers.
#[derive(Debug, Clone, Serialize)]
pub struct Enhancement {
    pub record: ParsedRecord,
    pub formatted: FormattedFeedback,
}

/// Stateless over requests; safe to share between concurrent calls.
#[derive(Clone)]
pub struct FeedbackService {
    prompt_builder: Arc<PromptBuilder>,
    generator: Arc<dyn TextGenerator>,
    params: GenerationParameters,
    deadline: Duration,
}

impl FeedbackService {
    pub fn new(
        prompt_builder: PromptBuilder,
        generator: Arc<dyn TextGenerator>,
        params: GenerationParameters,
        deadline: Duration,
    ) -> Self {
        Self {
            prompt_builder: Arc::new(prompt_builder),
            generator,
            params,
            deadline,
        }
    }

    /// Caller-facing operation. Never fails: validation messages and
    /// unexpected errors are returned in the first slot.
    pub async fn process_feedback(
        &self,
        text: &Value,
        feedback_type: &Value,
        tone: &Value,
        formality: &Value,
    ) -> FeedbackOutput {
        match self.enhance(text, feedback_type, tone, formality).await {
            Ok(enhancement) => {
                let copy = copy_text(&enhancement.record);
                let formatted = enhancement.formatted;
                FeedbackOutput {
                    enhanced: formatted.enhanced,
                    short_version: formatted.short,
                    fis: formatted.fis_markdown,
                    suggestions: formatted.suggestions_markdown,
                    copy_text: copy,
                }
            }
            Err(FeedbackError::Validation(e)) => FeedbackOutput::error(e.to_string()),
            Err(e) => FeedbackOutput::error(format!("Erro ao processar feedback: {e}")),
        }
    }

    /// Runs the pipeline under the configured deadline.
    pub async fn enhance(
        &self,
        text: &Value,
        feedback_type: &Value,
        tone: &Value,
        formality: &Value,
    ) -> Result<Enhancement, FeedbackError> {
        let request = FeedbackRequest::validate(text, feedback_type, tone, formality)?;

        tokio::time::timeout(self.deadline, self.run(&request))
            .await
            .map_err(|_| {
                warn!("Feedback pipeline exceeded its {:?} deadline", self.deadline);
                FeedbackError::DeadlineExceeded(self.deadline)
            })
    }

    async fn run(&self, request: &FeedbackRequest) -> Enhancement {
        let text = sanitize_text(&request.text);
        let prompt = self.prompt_builder.build(&text, &request.options);
        debug!("Built prompt of {} characters", prompt.chars().count());

        let raw = self.generator.generate(&prompt, &self.params).await;
        let record = parse_response(&raw);
        let formatted = format_output(&record);

        info!(
            feedback_type = request.options.feedback_type.label(),
            tone = request.options.tone.label(),
            formality = request.options.formality.label(),
            "Feedback processed"
        );

        Enhancement { record, formatted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::fallback::FALLBACK_NOTICE;
    use crate::llm_client::{LocalModel, WARMING_UP_NOTICE};
    use crate::models::feedback::RewriteResult;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a fixed reply and remembers the prompts it saw.
    struct CannedGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str, _params: &GenerationParameters) -> String {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    /// Simulates a cold endpoint the way the remote client degrades.
    struct WarmingUpGenerator;

    #[async_trait]
    impl TextGenerator for WarmingUpGenerator {
        async fn generate(&self, prompt: &str, _params: &GenerationParameters) -> String {
            crate::feedback::fallback::generate_fallback(prompt)
                .with_notes(WARMING_UP_NOTICE)
                .to_json()
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str, _params: &GenerationParameters) -> String {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "{}".to_string()
        }
    }

    fn service(generator: Arc<dyn TextGenerator>) -> FeedbackService {
        FeedbackService::new(
            PromptBuilder::default(),
            generator,
            GenerationParameters::default(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_short_text_short_circuits() {
        let generator = CannedGenerator::new("{}");
        let output = service(generator.clone())
            .process_feedback(
                &json!("abc"),
                &json!("geral"),
                &json!("construtivo"),
                &json!("neutro"),
            )
            .await;
        assert_eq!(
            output,
            FeedbackOutput::error("O texto deve ter pelo menos 10 caracteres.")
        );
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_option_short_circuits() {
        let output = service(Arc::new(LocalModel))
            .process_feedback(
                &json!("texto longo o bastante"),
                &json!("geral"),
                &json!("construtivo"),
                &json!("informal"),
            )
            .await;
        assert!(output.enhanced.starts_with("Nível de formalidade inválido."));
        assert!(output.copy_text.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_receives_sanitized_text() {
        let generator = CannedGenerator::new("{}");
        service(generator.clone())
            .process_feedback(
                &json!("  você   precisa\n\n\n melhorar  a comunicação "),
                &json!("comportamento"),
                &json!("construtivo"),
                &json!("neutro"),
            )
            .await;

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("você precisa\nmelhorar a comunicação"));
        assert!(prompts[0].contains("- Tipo de feedback: behavioral"));
    }

    #[tokio::test]
    async fn test_model_reply_is_formatted() {
        let reply = RewriteResult {
            enhanced_text: "Texto aprimorado".to_string(),
            short_version: "Curto".to_string(),
            fact_impact_suggestion: crate::models::feedback::FactImpactSuggestion {
                fact: "Fato".to_string(),
                impact: "Impacto".to_string(),
                suggestion: "Sugestão".to_string(),
            },
            extra_suggestions: vec!["Extra".to_string()],
            notes: String::new(),
        };
        let fenced = format!("```json\n{}\n```", reply.to_json());

        let output = service(CannedGenerator::new(&fenced))
            .process_feedback(
                &json!("um feedback qualquer"),
                &json!("geral"),
                &json!("direto"),
                &json!("formal"),
            )
            .await;
        assert_eq!(output.enhanced, "Texto aprimorado");
        assert_eq!(output.short_version, "Curto");
        assert!(output.fis.contains("**IMPACTO:**\nImpacto"));
        assert_eq!(output.suggestions, "**Sugestões Extras:**\n\n1. Extra");
        assert!(output.copy_text.contains("FEEDBACK APRIMORADO"));
        assert!(output.copy_text.contains("Texto aprimorado"));
        assert!(!output.copy_text.contains("OBSERVAÇÕES"));
    }

    #[tokio::test]
    async fn test_warming_up_endpoint_yields_local_rewrite() {
        let enhancement = service(Arc::new(WarmingUpGenerator))
            .enhance(
                &json!("vc precisa melhorar os testes"),
                &json!("técnico"),
                &json!("direto"),
                &json!("formal"),
            )
            .await
            .unwrap();
        assert_eq!(enhancement.record["observacoes"], WARMING_UP_NOTICE);
        assert_eq!(
            enhancement.record["feedback_aprimorado"],
            "Você precisa melhorar os testes."
        );
        assert_eq!(enhancement.formatted.notes, WARMING_UP_NOTICE);
    }

    #[tokio::test]
    async fn test_local_model_end_to_end() {
        let output = service(Arc::new(LocalModel))
            .process_feedback(
                &json!("vc precisa melhorar"),
                &json!("geral"),
                &json!("construtivo"),
                &json!("neutro"),
            )
            .await;
        assert_eq!(output.enhanced, "Você precisa melhorar.");
        assert!(output.copy_text.contains("OBSERVAÇÕES"));
        assert!(output.copy_text.contains(FALLBACK_NOTICE));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_shown_as_text() {
        let output = service(CannedGenerator::new("Desculpe, não consigo responder em JSON."))
            .process_feedback(
                &json!("feedback de teste aqui"),
                &json!("geral"),
                &json!("neutro"),
                &json!("casual"),
            )
            .await;
        assert_eq!(output.enhanced, "Desculpe, não consigo responder em JSON.");
        assert_eq!(output.short_version, "Resposta não formatada corretamente");
        assert_eq!(output.suggestions, "Nenhuma sugestão adicional.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_reported_as_processing_error() {
        let service = FeedbackService::new(
            PromptBuilder::default(),
            Arc::new(SlowGenerator),
            GenerationParameters::default(),
            Duration::from_secs(1),
        );
        let output = service
            .process_feedback(
                &json!("feedback de teste aqui"),
                &json!("geral"),
                &json!("neutro"),
                &json!("casual"),
            )
            .await;
        assert!(output.enhanced.starts_with("Erro ao processar feedback: "));
        assert!(output.short_version.is_empty());
    }
}
