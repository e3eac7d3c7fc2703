use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    pipeline::BackendRequest,
    services::backend::{decode_envelope, send_json, BackendKind, GenerativeBackend},
};

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .iter()
            .filter_map(|c| c.message.as_ref())
            .filter_map(|m| m.content.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

pub fn build_request_body(model: &str, request: &BackendRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: request.system_message.to_string(),
            },
            ChatMessage {
                role: "user",
                content: request.prompt.clone(),
            },
        ],
        temperature: request.params.temperature,
        top_p: request.params.top_p,
        max_tokens: request.params.max_output_tokens,
        response_format: request
            .json_output
            .then_some(ResponseFormat { kind: "json_object" }),
    }
}

pub fn parse_reply(body: &str) -> AppResult<String> {
    let envelope: ChatCompletionResponse = decode_envelope(BackendKind::OpenAi, body)?;

    envelope
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| AppError::BackendEmptyReply("OpenAI returned no message content.".to_string()))
}

pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenAi
    }

    async fn generate(&self, request: &BackendRequest, api_key: &SecretString) -> AppResult<String> {
        log::debug!(
            "Calling OpenAI model {} ({} prompt chars)",
            self.model,
            request.prompt.chars().count()
        );

        let body = build_request_body(&self.model, request);
        let raw = send_json(
            BackendKind::OpenAi,
            self.client
                .post(self.endpoint())
                .bearer_auth(api_key.expose_secret()),
            &body,
        )
        .await?;

        parse_reply(&raw)
    }
}
