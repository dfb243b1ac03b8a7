//! Response parser — turns raw model output into a record, never failing.

use serde_json::{json, Value};
use tracing::warn;

use crate::models::feedback::ParsedRecord;

/// Characters of the raw reply kept as the enhanced text of a malformed reply.
const MALFORMED_TEXT_CHARS: usize = 500;
/// Characters of the raw reply echoed into the notes of a malformed reply.
const MALFORMED_NOTES_CHARS: usize = 200;

/// Strips an optional code fence and decodes the reply as a JSON object.
/// Anything that is not a JSON object becomes a well-formed error record.
pub fn parse_response(raw: &str) -> ParsedRecord {
    let text = strip_json_fences(raw);

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => record,
        Ok(other) => {
            warn!("Model reply decoded to a non-object JSON value ({})", kind(&other));
            malformed_record(text)
        }
        Err(e) => {
            warn!("Model reply is not valid JSON: {e}");
            malformed_record(text)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Each fence is removed independently, so an unterminated fence is still stripped.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

fn malformed_record(text: &str) -> ParsedRecord {
    let enhanced = if text.is_empty() {
        "Erro ao processar resposta.".to_string()
    } else {
        truncate_chars(text, MALFORMED_TEXT_CHARS).to_string()
    };

    let notes = format!(
        "Resposta original: {}",
        truncate_chars(text, MALFORMED_NOTES_CHARS)
    );

    ParsedRecord::from_iter([
        ("feedback_aprimorado".to_string(), json!(enhanced)),
        (
            "versao_curta".to_string(),
            json!("Resposta não formatada corretamente"),
        ),
        (
            "fato_impacto_sugestao".to_string(),
            json!({
                "fato": "Resposta do modelo não está no formato esperado",
                "impacto": "Dados podem estar incompletos",
                "sugestao": "Tente novamente ou verifique a configuração do modelo"
            }),
        ),
        ("sugestoes_extras".to_string(), json!([])),
        ("observacoes".to_string(), json!(notes)),
    ])
}

/// Longest prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
