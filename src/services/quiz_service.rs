use crate::{
    errors::AppResult,
    models::domain::Quiz,
    pipeline::{normalize, recover_json, sanitize_json_candidate, validate_quiz, QUIZ_PROFILE},
    services::backend::{BackendCredentials, BackendRegistry},
};

pub struct QuizService {
    backends: BackendRegistry,
}

impl QuizService {
    pub fn new(backends: BackendRegistry) -> Self {
        Self { backends }
    }

    /// Generates a quiz of exactly three MCQs and two short-answer items.
    ///
    /// Text that is empty after normalization yields an empty quiz without
    /// calling the backend.
    pub async fn generate_quiz(
        &self,
        text: &str,
        credentials: &BackendCredentials,
    ) -> AppResult<Quiz> {
        let normalized = normalize(text, QUIZ_PROFILE.max_input_chars);
        if normalized.is_empty() {
            log::info!("Quiz requested for empty text, returning empty quiz");
            return Ok(Quiz::empty());
        }

        let request = QUIZ_PROFILE.build_request(&normalized);
        let raw = self.backends.generate(&request, credentials).await?;
        log::debug!("Quiz reply from {}: {} chars", credentials.kind, raw.len());

        let candidate = sanitize_json_candidate(&raw);
        let recovered = recover_json(&candidate).map_err(|failure| {
            log::warn!("Quiz JSON could not be recovered: {}", failure.last_error);
            failure.into_app_error(&raw)
        })?;
        log::debug!("Quiz JSON recovered by {}", recovered.strategy);

        let quiz = validate_quiz(&recovered.value)?;
        log::info!(
            "Generated quiz with {} MCQs and {} short-answer items",
            quiz.mcq.len(),
            quiz.short.len()
        );

        Ok(quiz)
    }
}
