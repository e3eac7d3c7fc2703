use std::env;
use secrecy::SecretString;

use crate::services::backend::BackendKind;

pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub sessions_collection: String,
    pub quiz_results_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub gemini_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
    pub default_backend: BackendKind,
    pub gemini_model: String,
    pub openai_model: String,
    pub gemini_base_url: String,
    pub openai_base_url: String,
    pub backend_timeout_secs: u64,
}

fn optional_secret(name: &str) -> Option<SecretString> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

impl Config {
    pub fn from_env() -> Self {
        let gemini_api_key = optional_secret("GEMINI_API_KEY");
        let openai_api_key = optional_secret("OPENAI_API_KEY");

        // An explicit DEFAULT_BACKEND wins; otherwise prefer whichever key is configured.
        let default_backend = env::var("DEFAULT_BACKEND")
            .ok()
            .and_then(|b| b.parse().ok())
            .unwrap_or(match (&gemini_api_key, &openai_api_key) {
                (None, Some(_)) => BackendKind::OpenAi,
                _ => BackendKind::Gemini,
            });

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "neurolearn-local".to_string()),
            sessions_collection: env::var("SESSIONS_COLLECTION")
                .unwrap_or_else(|_| "sessions".to_string()),
            quiz_results_collection: env::var("QUIZ_RESULTS_COLLECTION")
                .unwrap_or_else(|_| "quiz_results".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_key,
            openai_api_key,
            default_backend,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
        }
    }

    /// The configured key for a backend, if any.
    pub fn api_key_for(&self, kind: BackendKind) -> Option<&SecretString> {
        match kind {
            BackendKind::Gemini => self.gemini_api_key.as_ref(),
            BackendKind::OpenAi => self.openai_api_key.as_ref(),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the default backend has no key or the timeout is unusable
    pub fn validate_for_production(&self) {
        if self.api_key_for(self.default_backend).is_none() {
            panic!(
                "FATAL: no API key configured for default backend '{}'. Set GEMINI_API_KEY or OPENAI_API_KEY.",
                self.default_backend
            );
        }

        if self.backend_timeout_secs == 0 {
            panic!("FATAL: BACKEND_TIMEOUT_SECS must be greater than zero.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "neurolearn-test".to_string(),
            sessions_collection: "sessions".to_string(),
            quiz_results_collection: "quiz_results".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            gemini_api_key: Some(SecretString::from("test-gemini-key".to_string())),
            openai_api_key: None,
            default_backend: BackendKind::Gemini,
            gemini_model: "gemini-2.0-flash".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            openai_base_url: "http://127.0.0.1:9".to_string(),
            backend_timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
        }
    }
}
