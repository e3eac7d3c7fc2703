use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    pipeline::BackendRequest,
    services::backend::{decode_envelope, send_json, BackendKind, GenerativeBackend},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// `candidates` is required; a body without it is malformed.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// First non-empty text part across all candidates.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

pub fn build_request_body(request: &BackendRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(request.prompt.clone()),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: request.params.temperature,
            top_k: request.params.top_k,
            top_p: request.params.top_p,
            max_output_tokens: request.params.max_output_tokens,
        },
    }
}

pub fn parse_reply(body: &str) -> AppResult<String> {
    let envelope: GenerateContentResponse = decode_envelope(BackendKind::Gemini, body)?;

    envelope
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| AppError::BackendEmptyReply("Gemini returned no text content.".to_string()))
}

pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// The key travels as a query parameter; never log this URL.
    fn endpoint(&self, api_key: &SecretString) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            api_key.expose_secret()
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gemini
    }

    async fn generate(&self, request: &BackendRequest, api_key: &SecretString) -> AppResult<String> {
        log::debug!(
            "Calling Gemini model {} ({} prompt chars)",
            self.model,
            request.prompt.chars().count()
        );

        let body = build_request_body(request);
        let raw = send_json(
            BackendKind::Gemini,
            self.client.post(self.endpoint(api_key)),
            &body,
        )
        .await?;

        parse_reply(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::QUIZ_PROFILE;

    #[test]
    fn request_body_uses_camel_case_generation_config() {
        let request = QUIZ_PROFILE.build_request("Photosynthesis makes sugar.");
        let json = serde_json::to_value(build_request_body(&request)).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            serde_json::Value::String(request.prompt.clone())
        );
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2000);
        assert!(json["generationConfig"].get("max_output_tokens").is_none());
    }

    #[test]
    fn endpoint_carries_model_and_key() {
        let backend = GeminiBackend::new(
            reqwest::Client::new(),
            "https://generativelanguage.googleapis.com/",
            "gemini-2.0-flash",
        );
        let url = backend.endpoint(&SecretString::from("abc".to_string()));

        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=abc"
        );
    }

    #[test]
    fn parse_reply_returns_first_non_empty_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "  "}]}},
                {"content": {"parts": [{"text": "{\"mcq\": []}"}]}}
            ]
        }"#;

        assert_eq!(parse_reply(body).unwrap(), "{\"mcq\": []}");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let err = parse_reply(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, AppError::BackendMalformedResponse(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_reply("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, AppError::BackendMalformedResponse(_)));
    }

    #[test]
    fn candidates_without_text_is_an_empty_reply() {
        let err = parse_reply(r#"{"candidates": [{"finishReason": "SAFETY"}, {"content": {}}]}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::BackendEmptyReply(_)));

        let err = parse_reply(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, AppError::BackendEmptyReply(_)));
    }
}
