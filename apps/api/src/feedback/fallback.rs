//! Local fallback generator — a rule-based rewrite used whenever the remote
//! model cannot answer. It only needs the rendered prompt: the user's text is
//! recovered from between the prompt markers.

use crate::feedback::prompts::{INSTRUCTIONS_MARKER, ORIGINAL_TEXT_MARKER};
use crate::models::feedback::{FactImpactSuggestion, RewriteResult};

/// Number of words kept in the short version.
const SHORT_VERSION_WORDS: usize = 15;

pub const FALLBACK_NOTICE: &str = "⚠️ Modo fallback ativo. Para melhorias mais sofisticadas, \
configure uma chave de API do Hugging Face ou use um modelo local.";

/// Informal Portuguese abbreviations and their written-out forms.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("vc", "você"),
    ("pq", "porque"),
    ("tb", "também"),
    ("tbm", "também"),
    ("nao", "não"),
    ("eh", "é"),
    ("ta", "está"),
    ("to", "estou"),
];

const GENERIC_SUGGESTIONS: &[&str] = &[
    "Seja específico sobre comportamentos observados",
    "Foque em ações, não em características pessoais",
    "Ofereça exemplos concretos quando possível",
    "Use linguagem respeitosa e construtiva",
];

/// Builds a complete rewrite locally from the prompt.
pub fn generate_fallback(prompt: &str) -> RewriteResult {
    let Some(original) = extract_original_text(prompt) else {
        return processing_error_record();
    };

    let improved = improve_text_basic(original);
    let short_version = short_version(&improved);

    RewriteResult {
        enhanced_text: improved,
        short_version,
        fact_impact_suggestion: FactImpactSuggestion {
            fact: "Feedback recebido para análise e melhoria".to_string(),
            impact: "Oportunidade de aprimorar a comunicação profissional".to_string(),
            suggestion: "Revisar o feedback aprimorado e aplicar as sugestões fornecidas"
                .to_string(),
        },
        extra_suggestions: GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        notes: FALLBACK_NOTICE.to_string(),
    }
}

/// Text between the original-text marker and the instructions marker, trimmed.
fn extract_original_text(prompt: &str) -> Option<&str> {
    let (_, after) = prompt.split_once(ORIGINAL_TEXT_MARKER)?;
    let original = after
        .split_once(INSTRUCTIONS_MARKER)
        .map_or(after, |(text, _)| text);
    Some(original.trim())
}

fn processing_error_record() -> RewriteResult {
    RewriteResult {
        enhanced_text: "Erro ao processar feedback.".to_string(),
        short_version: "Erro no processamento".to_string(),
        fact_impact_suggestion: FactImpactSuggestion {
            fact: "Erro no processamento".to_string(),
            impact: "Não foi possível melhorar o feedback".to_string(),
            suggestion: "Tente novamente ou verifique a conexão".to_string(),
        },
        extra_suggestions: vec![],
        notes: "Erro no processamento do feedback.".to_string(),
    }
}

/// Capitalizes, terminates with punctuation and expands known abbreviations.
/// Words are re-joined with single spaces.
pub fn improve_text_basic(text: &str) -> String {
    let mut improved = capitalize_first(text.trim());
    if improved.is_empty() {
        return improved;
    }

    if !improved.ends_with(['.', '!', '?']) {
        improved.push('.');
    }

    improved
        .split_whitespace()
        .map(expand_abbreviation)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expands a single word, keeping its trailing punctuation and the case of its first letter.
fn expand_abbreviation(word: &str) -> String {
    let bare = word.trim_end_matches(['.', ',', '!', '?', ';', ':']);
    let punctuation = &word[bare.len()..];

    let lowered = bare.to_lowercase();
    match ABBREVIATIONS.iter().find(|(short, _)| *short == lowered) {
        Some((_, expanded)) => {
            let starts_upper = bare.chars().next().is_some_and(char::is_uppercase);
            let expanded = if starts_upper {
                capitalize_first(expanded)
            } else {
                expanded.to_string()
            };
            format!("{expanded}{punctuation}")
        }
        None => word.to_string(),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn short_version(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut short = words
        .iter()
        .take(SHORT_VERSION_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > SHORT_VERSION_WORDS {
        short.push_str("...");
    }
    short
}
