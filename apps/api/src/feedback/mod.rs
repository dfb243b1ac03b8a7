// Feedback rewrite: validation, sanitization, prompt rendering, local
// fallback, reply parsing and output formatting.
// All model calls go through llm_client — no direct endpoint calls here.

pub mod fallback;
pub mod formatter;
pub mod handlers;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod sanitize;
pub mod validation;
