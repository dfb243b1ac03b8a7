use crate::feedback::pipeline::FeedbackService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub feedback: FeedbackService,
}
