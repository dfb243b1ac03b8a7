use serde_json::Value;
use thiserror::Error;

use crate::feedback::options::{FeedbackType, Formality, RewriteOptions, Tone};

pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 5000;

/// Why an input was rejected. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("O texto de feedback não pode estar vazio.")]
    EmptyInput,

    #[error("O texto deve ser uma string.")]
    WrongType,

    #[error("O texto deve ter pelo menos 10 caracteres.")]
    TooShort,

    #[error("O texto não pode exceder 5000 caracteres.")]
    TooLong,

    #[error("{subject} inválido. Use: {}", .allowed.join(", "))]
    InvalidEnum {
        subject: &'static str,
        allowed: &'static [&'static str],
    },
}

/// A validated rewrite request. Only constructed through [`FeedbackRequest::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub text: String,
    pub options: RewriteOptions,
}

impl FeedbackRequest {
    /// Validates text, then type, then tone, then formality, stopping at the first failure.
    /// Options arrive as raw JSON values; anything but a known label string is
    /// an invalid option.
    pub fn validate(
        text: &Value,
        feedback_type: &Value,
        tone: &Value,
        formality: &Value,
    ) -> Result<Self, ValidationError> {
        let text = validate_text_value(text)?;
        let options = RewriteOptions {
            feedback_type: validate_feedback_type(option_label(feedback_type))?,
            tone: validate_tone(option_label(tone))?,
            formality: validate_formality(option_label(formality))?,
        };
        Ok(Self {
            text: text.to_string(),
            options,
        })
    }
}

/// Length bounds apply to the trimmed text and are inclusive.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let length = text.trim().chars().count();
    if length < MIN_TEXT_CHARS {
        return Err(ValidationError::TooShort);
    }
    if length > MAX_TEXT_CHARS {
        return Err(ValidationError::TooLong);
    }

    Ok(())
}

/// Validates text that arrived as an arbitrary JSON value.
/// Absent and empty values are `EmptyInput`; other non-strings are `WrongType`.
pub fn validate_text_value(value: &Value) -> Result<&str, ValidationError> {
    match value {
        Value::Null => Err(ValidationError::EmptyInput),
        Value::String(text) => validate_text(text).map(|_| text.as_str()),
        _ => Err(ValidationError::WrongType),
    }
}

/// The label carried by an option value. Non-strings map to the empty label,
/// which no option accepts.
fn option_label(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

pub fn validate_feedback_type(label: &str) -> Result<FeedbackType, ValidationError> {
    FeedbackType::from_label(label).ok_or(ValidationError::InvalidEnum {
        subject: "Tipo de feedback",
        allowed: FeedbackType::LABELS,
    })
}

pub fn validate_tone(label: &str) -> Result<Tone, ValidationError> {
    Tone::from_label(label).ok_or(ValidationError::InvalidEnum {
        subject: "Tom",
        allowed: Tone::LABELS,
    })
}

pub fn validate_formality(label: &str) -> Result<Formality, ValidationError> {
    Formality::from_label(label).ok_or(ValidationError::InvalidEnum {
        subject: "Nível de formalidade",
        allowed: Formality::LABELS,
    })
}
