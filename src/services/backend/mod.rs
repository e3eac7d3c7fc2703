use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    pipeline::BackendRequest,
};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Gemini,
    OpenAi,
}

impl BackendKind {
    /// Legacy routing: OpenAI keys start with `sk-`, anything else is treated as a Gemini key.
    pub fn infer_from_key(api_key: &str) -> Self {
        if api_key.starts_with("sk-") {
            BackendKind::OpenAi
        } else {
            BackendKind::Gemini
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Gemini => "gemini",
            BackendKind::OpenAi => "openai",
        }
    }

    /// Provider name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendKind::Gemini => "Gemini",
            BackendKind::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(BackendKind::Gemini),
            "openai" => Ok(BackendKind::OpenAi),
            other => Err(AppError::InputError(format!("Unknown backend '{}'", other))),
        }
    }
}

/// A generative-text provider. Returns the first non-empty text payload of the reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn generate(&self, request: &BackendRequest, api_key: &SecretString)
        -> AppResult<String>;
}

/// Which backend to call and with which key.
#[derive(Clone, Debug)]
pub struct BackendCredentials {
    pub kind: BackendKind,
    pub api_key: SecretString,
}

impl BackendCredentials {
    pub fn new(kind: BackendKind, api_key: SecretString) -> Self {
        Self { kind, api_key }
    }

    /// A caller-supplied key wins over configuration. When the caller names no
    /// backend, a supplied key is routed by its prefix and a configured key by
    /// the configured default.
    pub fn resolve(
        config: &Config,
        api_key: Option<&str>,
        backend: Option<BackendKind>,
    ) -> AppResult<Self> {
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            let kind = backend.unwrap_or_else(|| BackendKind::infer_from_key(key));
            return Ok(Self::new(kind, SecretString::from(key.to_string())));
        }

        let kind = backend.unwrap_or(config.default_backend);
        let key = config
            .api_key_for(kind)
            .cloned()
            .ok_or_else(|| AppError::InputError("API key required.".to_string()))?;

        Ok(Self::new(kind, key))
    }
}

#[derive(Clone)]
pub struct BackendRegistry {
    gemini: Arc<dyn GenerativeBackend>,
    openai: Arc<dyn GenerativeBackend>,
}

impl BackendRegistry {
    pub fn new(gemini: Arc<dyn GenerativeBackend>, openai: Arc<dyn GenerativeBackend>) -> Self {
        Self { gemini, openai }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = build_http_client(Duration::from_secs(config.backend_timeout_secs))?;

        Ok(Self::new(
            Arc::new(GeminiBackend::new(
                client.clone(),
                &config.gemini_base_url,
                &config.gemini_model,
            )),
            Arc::new(OpenAiBackend::new(
                client,
                &config.openai_base_url,
                &config.openai_model,
            )),
        ))
    }

    pub fn get(&self, kind: BackendKind) -> &Arc<dyn GenerativeBackend> {
        match kind {
            BackendKind::Gemini => &self.gemini,
            BackendKind::OpenAi => &self.openai,
        }
    }

    pub async fn generate(
        &self,
        request: &BackendRequest,
        credentials: &BackendCredentials,
    ) -> AppResult<String> {
        self.get(credentials.kind)
            .generate(request, &credentials.api_key)
            .await
    }
}

pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Describes a reqwest failure without its request URL, which may carry an API key.
fn redacted_detail(err: reqwest::Error) -> String {
    err.without_url().to_string()
}

fn transport_error(kind: BackendKind, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        log::warn!("{} API request timed out", kind.display_name());
        AppError::BackendUnreachable(format!("{} API request timed out.", kind.display_name()))
    } else {
        log::warn!(
            "Unable to reach {} API: {}",
            kind.display_name(),
            redacted_detail(err)
        );
        AppError::BackendUnreachable(format!("Unable to reach {} API.", kind.display_name()))
    }
}

/// Sends a JSON body and returns the raw response text of a 2xx reply.
pub(crate) async fn send_json<T: Serialize + ?Sized>(
    kind: BackendKind,
    request: reqwest::RequestBuilder,
    body: &T,
) -> AppResult<String> {
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(kind, e))?;

    let status = response.status();
    let text = response.text().await.map_err(|e| transport_error(kind, e))?;

    if !status.is_success() {
        log::error!("{} API HTTP error: {}", kind.display_name(), status);
        return Err(AppError::BackendHttpError {
            status: status.as_u16(),
            body: text,
        });
    }

    if text.trim().is_empty() {
        return Err(AppError::BackendMalformedResponse(format!(
            "{} API returned empty response.",
            kind.display_name()
        )));
    }

    Ok(text)
}

/// Parses a provider envelope, mapping decode failures to `BackendMalformedResponse`.
pub(crate) fn decode_envelope<'de, T: Deserialize<'de>>(
    kind: BackendKind,
    body: &'de str,
) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| {
        AppError::BackendMalformedResponse(format!(
            "{} API returned invalid JSON response: {}",
            kind.display_name(),
            e
        ))
    })
}
