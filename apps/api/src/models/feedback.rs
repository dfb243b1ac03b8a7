use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded model reply. No schema is enforced at decode time; the
/// formatter tolerates missing and `null` keys.
pub type ParsedRecord = Map<String, Value>;

/// The structured rewrite the remote model is asked to produce.
/// Serialized with the Portuguese keys the prompt schema names, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteResult {
    #[serde(rename = "feedback_aprimorado")]
    pub enhanced_text: String,
    #[serde(rename = "versao_curta")]
    pub short_version: String,
    #[serde(rename = "fato_impacto_sugestao")]
    pub fact_impact_suggestion: FactImpactSuggestion,
    #[serde(rename = "sugestoes_extras")]
    pub extra_suggestions: Vec<String>,
    #[serde(rename = "observacoes")]
    pub notes: String,
}

/// Fact-Impact-Suggestion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactImpactSuggestion {
    #[serde(rename = "fato")]
    pub fact: String,
    #[serde(rename = "impacto")]
    pub impact: String,
    #[serde(rename = "sugestao")]
    pub suggestion: String,
}

impl RewriteResult {
    /// Replaces the notes field, keeping everything else.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Pretty-printed JSON (2-space indent, non-ASCII kept literal).
    pub fn to_json(&self) -> String {
        // Every field is a string or a list of strings, so serialization cannot fail.
        serde_json::to_string_pretty(self).expect("RewriteResult serializes to JSON")
    }
}
