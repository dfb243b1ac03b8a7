//! Output formatter — projects a parsed record into display strings.
//! Missing keys and `null` values fall back to placeholders.

use serde::Serialize;
use serde_json::Value;

use crate::models::feedback::ParsedRecord;

const NOT_AVAILABLE: &str = "Não disponível";
const NOT_SPECIFIED: &str = "Não especificado";
const NO_SUGGESTIONS: &str = "Nenhuma sugestão adicional.";
const SEPARATOR_WIDTH: usize = 50;

/// Display-ready sections of a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedFeedback {
    pub enhanced: String,
    pub short: String,
    pub fis_markdown: String,
    pub suggestions_markdown: String,
    pub notes: String,
}

pub fn format_output(record: &ParsedRecord) -> FormattedFeedback {
    FormattedFeedback {
        enhanced: text_field(record.get("feedback_aprimorado"), NOT_AVAILABLE),
        short: text_field(record.get("versao_curta"), NOT_AVAILABLE),
        fis_markdown: format_fis(record.get("fato_impacto_sugestao")),
        suggestions_markdown: format_suggestions(&suggestion_list(record.get("sugestoes_extras"))),
        notes: text_field(record.get("observacoes"), ""),
    }
}

/// Single plain-text block with every section, for copy and paste.
/// The notes section is only present when notes are non-empty.
pub fn copy_text(record: &ParsedRecord) -> String {
    let formatted = format_output(record);
    let mut text = String::new();

    push_section(&mut text, "FEEDBACK APRIMORADO", &formatted.enhanced);
    text.push('\n');
    push_section(&mut text, "VERSÃO CURTA", &formatted.short);
    text.push('\n');
    push_section(&mut text, "FATO-IMPACTO-SUGESTÃO", &formatted.fis_markdown);
    text.push('\n');
    push_section(&mut text, "SUGESTÕES EXTRAS", &formatted.suggestions_markdown);

    if !formatted.notes.is_empty() {
        text.push('\n');
        push_section(&mut text, "OBSERVAÇÕES", &formatted.notes);
    }

    text
}

/// Renders fact, impact and suggestion as three labelled markdown blocks.
pub fn format_fis(value: Option<&Value>) -> String {
    let fis = value.and_then(Value::as_object);
    let field = |key: &str| text_field(fis.and_then(|f| f.get(key)), NOT_SPECIFIED);

    format!(
        "**FATO:**\n{}\n\n**IMPACTO:**\n{}\n\n**SUGESTÃO:**\n{}",
        field("fato"),
        field("impacto"),
        field("sugestao")
    )
}

/// Renders suggestions as a numbered markdown list.
pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return NO_SUGGESTIONS.to_string();
    }

    let items = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**Sugestões Extras:**\n\n{items}")
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    out.push_str(body);
    out.push('\n');
}

/// Strings pass through, `null`/absent use `default`, anything else is rendered as JSON.
fn text_field(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn suggestion_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| text_field(Some(item), ""))
            .collect(),
        _ => vec![],
    }
}
