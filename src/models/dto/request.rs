use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Quiz;
use crate::services::backend::BackendKind;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(max = 200000))]
    pub text: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub backend: Option<BackendKind>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SimplifyRequest {
    #[validate(length(max = 200000))]
    pub text: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub backend: Option<BackendKind>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GradeQuizRequest {
    /// When present, the score is stored for this learner.
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub user_id: Option<String>,

    pub quiz: Quiz,

    /// One entry per MCQ, in order; `null` for unanswered.
    #[serde(default)]
    pub responses: Vec<Option<String>>,

    #[validate(range(min = 0.0, max = 1440.0))]
    #[serde(default)]
    pub reading_minutes: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,

    #[validate(length(max = 200000))]
    pub raw_text: String,

    #[validate(length(max = 200000))]
    pub simplified_text: String,

    #[validate(length(min = 1, max = 32))]
    pub level: String,
}
