// Prompt constants for the feedback rewrite.
// The markers below are shared with the local fallback generator, which
// locates the user's text inside a rendered prompt.

/// Preamble used when the master prompt file cannot be read.
pub const DEFAULT_MASTER_PROMPT: &str = "\
Você é um especialista em comunicação profissional e feedback construtivo.

Sua tarefa é melhorar textos de feedback, tornando-os:
- Claros e objetivos
- Respeitosos e profissionais
- Acionáveis (com sugestões concretas)
- Construtivos (focando em crescimento)

Siga o formato solicitado e adapte o tom e formalidade conforme as preferências.";

/// Heading that precedes the user's text.
pub const ORIGINAL_TEXT_MARKER: &str = "TEXTO ORIGINAL PARA MELHORAR:";

/// Heading that follows the user's text.
pub const INSTRUCTIONS_MARKER: &str = "INSTRUÇÕES:";

/// Rewrite prompt template.
/// Replace: {master_prompt}, {feedback_type}, {tone}, {formality}, {feedback_text}
///
/// Rendered in a single pass, so substituted text containing a placeholder is
/// never expanded.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"{master_prompt}

CONTEXTO:
- Tipo de feedback: {feedback_type}
- Tom desejado: {tone}
- Nível de formalidade: {formality}

TEXTO ORIGINAL PARA MELHORAR:
{feedback_text}

INSTRUÇÕES:
1. Analise o texto original
2. Identifique pontos que podem ser melhorados (clareza, respeito, objetividade)
3. Gere uma versão aprimorada do feedback
4. Crie uma versão curta (resumo executivo)
5. Formate no padrão Fato-Impacto-Sugestão
6. Forneça sugestões extras de melhoria

FORMATO DE RESPOSTA (JSON):
{
    "feedback_aprimorado": "texto completo melhorado",
    "versao_curta": "resumo em 2-3 frases",
    "fato_impacto_sugestao": {
        "fato": "o que aconteceu/foi observado",
        "impacto": "como isso afeta o trabalho/equipe",
        "sugestao": "ação recomendada"
    },
    "sugestoes_extras": [
        "sugestão 1",
        "sugestão 2",
        "sugestão 3"
    ],
    "observacoes": "notas adicionais sobre o feedback original"
}

Responda APENAS com o JSON válido, sem texto adicional antes ou depois."#;
