//! Prompt builder — renders the rewrite prompt from the master preamble,
//! the chosen options and the sanitized feedback text.

use std::path::Path;

use tracing::{debug, warn};

use crate::feedback::options::RewriteOptions;
use crate::feedback::prompts::{DEFAULT_MASTER_PROMPT, REWRITE_PROMPT_TEMPLATE};

/// Holds the master preamble, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    master_prompt: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MASTER_PROMPT)
    }
}

impl PromptBuilder {
    pub fn new(master_prompt: impl Into<String>) -> Self {
        Self {
            master_prompt: master_prompt.into(),
        }
    }

    /// Reads the master preamble from `path`. Any read failure, or an empty
    /// file, falls back to the built-in preamble.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) if !contents.trim().is_empty() => {
                debug!("Loaded master prompt from {}", path.display());
                Self::new(contents.trim_end())
            }
            Ok(_) => {
                warn!(
                    "Master prompt file {} is empty, using built-in preamble",
                    path.display()
                );
                Self::default()
            }
            Err(e) => {
                warn!(
                    "Could not read master prompt {} ({e}), using built-in preamble",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn master_prompt(&self) -> &str {
        &self.master_prompt
    }

    /// Renders the full prompt. Deterministic for the same inputs.
    pub fn build(&self, feedback_text: &str, options: &RewriteOptions) -> String {
        render(
            REWRITE_PROMPT_TEMPLATE,
            &[
                ("master_prompt", &self.master_prompt),
                ("feedback_type", options.feedback_type.descriptor()),
                ("tone", options.tone.descriptor()),
                ("formality", options.formality.descriptor()),
                ("feedback_text", feedback_text),
            ],
        )
    }
}

/// Single pass over `template`: each `{name}` with a known name is replaced by
/// its value, and inserted values are never scanned again. Unknown braces are
/// copied as-is.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                rendered.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::options::{FeedbackType, Formality, Tone};
    use crate::feedback::prompts::{INSTRUCTIONS_MARKER, ORIGINAL_TEXT_MARKER};
    use std::io::Write;

    fn options(feedback_type: FeedbackType, tone: Tone, formality: Formality) -> RewriteOptions {
        RewriteOptions {
            feedback_type,
            tone,
            formality,
        }
    }

    #[test]
    fn test_prompt_contains_text_verbatim() {
        let text = "o código que você entregou tinha muitos bugs.\nprecisa ser mais cuidadoso.";
        let prompt = PromptBuilder::default().build(text, &RewriteOptions::default());
        assert!(prompt.contains(text));
    }

    #[test]
    fn test_prompt_contains_option_descriptors() {
        let prompt = PromptBuilder::default().build(
            "texto de exemplo",
            &options(FeedbackType::Leadership, Tone::Encouraging, Formality::Casual),
        );
        assert!(prompt.contains("- Tipo de feedback: leadership"));
        assert!(prompt.contains("- Tom desejado: encouraging and positive"));
        assert!(prompt.contains("- Nível de formalidade: casual and friendly"));
    }

    #[test]
    fn test_prompt_names_every_schema_key() {
        let prompt = PromptBuilder::default().build("texto", &RewriteOptions::default());
        for key in [
            "\"feedback_aprimorado\"",
            "\"versao_curta\"",
            "\"fato_impacto_sugestao\"",
            "\"fato\"",
            "\"impacto\"",
            "\"sugestao\"",
            "\"sugestoes_extras\"",
            "\"observacoes\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_text_sits_between_markers() {
        let prompt = PromptBuilder::default().build("meu texto", &RewriteOptions::default());
        let start = prompt.find(ORIGINAL_TEXT_MARKER).unwrap();
        let text = prompt.find("meu texto").unwrap();
        let end = prompt.find(INSTRUCTIONS_MARKER).unwrap();
        assert!(start < text && text < end);
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::default();
        let opts = options(FeedbackType::Technical, Tone::Direct, Formality::Formal);
        assert_eq!(builder.build("abc def ghi", &opts), builder.build("abc def ghi", &opts));
    }

    #[test]
    fn test_placeholders_in_user_text_are_not_expanded() {
        let prompt = PromptBuilder::default().build("veja {tone} e {master_prompt}", &RewriteOptions::default());
        assert!(prompt.contains("veja {tone} e {master_prompt}"));
    }

    #[test]
    fn test_placeholders_in_preamble_are_not_expanded() {
        let prompt = PromptBuilder::new("Preâmbulo {feedback_text} fim")
            .build("meu texto do usuário", &RewriteOptions::default());
        assert_eq!(prompt.matches("meu texto do usuário").count(), 1);
        assert!(prompt.starts_with("Preâmbulo {feedback_text} fim\n\nCONTEXTO:"));
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_braces() {
        assert_eq!(
            render("{a} {\"json\": 1} {b", &[("a", "x"), ("b", "y")]),
            "x {\"json\": 1} {b"
        );
    }

    #[test]
    fn test_load_reads_preamble_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Preâmbulo personalizado.").unwrap();

        let builder = PromptBuilder::load(file.path());
        assert_eq!(builder.master_prompt(), "Preâmbulo personalizado.");
        assert!(builder
            .build("texto", &RewriteOptions::default())
            .starts_with("Preâmbulo personalizado.\n\nCONTEXTO:"));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let builder = PromptBuilder::load(&dir.path().join("absent.txt"));
        assert_eq!(builder.master_prompt(), DEFAULT_MASTER_PROMPT);
    }

    #[test]
    fn test_load_empty_file_falls_back_to_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let builder = PromptBuilder::load(file.path());
        assert_eq!(builder.master_prompt(), DEFAULT_MASTER_PROMPT);
    }
}
