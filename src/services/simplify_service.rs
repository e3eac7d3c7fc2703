use crate::{
    errors::AppResult,
    models::domain::SimplifiedText,
    pipeline::{normalize, sanitize_bullets, validate_simplified, SIMPLIFY_PROFILE},
    services::backend::{BackendCredentials, BackendRegistry},
};

pub struct SimplifyService {
    backends: BackendRegistry,
}

impl SimplifyService {
    pub fn new(backends: BackendRegistry) -> Self {
        Self { backends }
    }

    /// Rewrites text as up to ten short bullets; at least five must survive sanitizing.
    pub async fn simplify_text(
        &self,
        text: &str,
        credentials: &BackendCredentials,
    ) -> AppResult<SimplifiedText> {
        let normalized = normalize(text, SIMPLIFY_PROFILE.max_input_chars);
        if normalized.is_empty() {
            log::info!("Simplification requested for empty text, returning empty result");
            return Ok(SimplifiedText::empty());
        }

        let request = SIMPLIFY_PROFILE.build_request(&normalized);
        let raw = self.backends.generate(&request, credentials).await?;
        log::debug!("Simplify reply from {}: {} chars", credentials.kind, raw.len());

        let lines = sanitize_bullets(&raw);
        let simplified = validate_simplified(&lines)?;
        log::info!("Simplified text into {} bullets", simplified.len());

        Ok(simplified)
    }
}
