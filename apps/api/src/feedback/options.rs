//! Rewrite options — the three closed sets a caller picks from, and the
//! English descriptors the prompt uses for each of them.
//!
//! Labels are the product's Portuguese names. The English names are
//! accepted as aliases so API callers may use either.

/// Context of the feedback being rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackType {
    #[default]
    General,
    Performance,
    Behavioral,
    Technical,
    Leadership,
}

/// Desired tone of the rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Constructive,
    Neutral,
    Encouraging,
    Direct,
}

/// Desired formality of the rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Formality {
    Formal,
    #[default]
    Neutral,
    Casual,
}

impl FeedbackType {
    pub const LABELS: &'static [&'static str] =
        &["geral", "desempenho", "comportamento", "técnico", "liderança"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "geral" | "general" => Some(Self::General),
            "desempenho" | "performance" => Some(Self::Performance),
            "comportamento" | "behavioral" => Some(Self::Behavioral),
            "técnico" | "technical" => Some(Self::Technical),
            "liderança" | "leadership" => Some(Self::Leadership),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "geral",
            Self::Performance => "desempenho",
            Self::Behavioral => "comportamento",
            Self::Technical => "técnico",
            Self::Leadership => "liderança",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Performance => "performance",
            Self::Behavioral => "behavioral",
            Self::Technical => "technical",
            Self::Leadership => "leadership",
        }
    }
}

impl Tone {
    pub const LABELS: &'static [&'static str] = &["construtivo", "neutro", "encorajador", "direto"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "construtivo" | "constructive" => Some(Self::Constructive),
            "neutro" | "neutral" => Some(Self::Neutral),
            "encorajador" | "encouraging" => Some(Self::Encouraging),
            "direto" | "direct" => Some(Self::Direct),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Constructive => "construtivo",
            Self::Neutral => "neutro",
            Self::Encouraging => "encorajador",
            Self::Direct => "direto",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Constructive => "constructive and supportive",
            Self::Neutral => "neutral and balanced",
            Self::Encouraging => "encouraging and positive",
            Self::Direct => "direct and straightforward",
        }
    }
}

impl Formality {
    pub const LABELS: &'static [&'static str] = &["formal", "neutro", "casual"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "formal" => Some(Self::Formal),
            "neutro" | "neutral" => Some(Self::Neutral),
            "casual" => Some(Self::Casual),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Neutral => "neutro",
            Self::Casual => "casual",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Formal => "formal and professional",
            Self::Neutral => "neutral",
            Self::Casual => "casual and friendly",
        }
    }
}

/// The three options chosen for one rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub feedback_type: FeedbackType,
    pub tone: Tone,
    pub formality: Formality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_round_trips() {
        for label in FeedbackType::LABELS {
            assert_eq!(FeedbackType::from_label(label).unwrap().label(), *label);
        }
        for label in Tone::LABELS {
            assert_eq!(Tone::from_label(label).unwrap().label(), *label);
        }
        for label in Formality::LABELS {
            assert_eq!(Formality::from_label(label).unwrap().label(), *label);
        }
    }

    #[test]
    fn test_english_aliases_are_accepted() {
        assert_eq!(
            FeedbackType::from_label("technical"),
            Some(FeedbackType::Technical)
        );
        assert_eq!(Tone::from_label("encouraging"), Some(Tone::Encouraging));
        assert_eq!(Formality::from_label("neutral"), Some(Formality::Neutral));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(FeedbackType::from_label("Geral"), None);
        assert_eq!(Tone::from_label("DIRETO"), None);
    }

    #[test]
    fn test_tone_descriptors() {
        assert_eq!(Tone::Constructive.descriptor(), "constructive and supportive");
        assert_eq!(Tone::Direct.descriptor(), "direct and straightforward");
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let options = RewriteOptions::default();
        assert_eq!(options.feedback_type.label(), "geral");
        assert_eq!(options.tone.label(), "construtivo");
        assert_eq!(options.formality.label(), "neutro");
    }
}
