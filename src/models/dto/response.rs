use serde::Serialize;

use crate::models::domain::{QuizGrade, SimplifiedText};
use crate::services::adaptivity::ReadingLevel;

#[derive(Debug, Clone, Serialize)]
pub struct SimplifyResponse {
    pub bullets: Vec<String>,
    /// The bullets rendered as `"- "` lines.
    pub text: String,
}

impl From<SimplifiedText> for SimplifyResponse {
    fn from(simplified: SimplifiedText) -> Self {
        SimplifyResponse {
            text: simplified.to_string(),
            bullets: simplified.bullets,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeQuizResponse {
    #[serde(flatten)]
    pub grade: QuizGrade,
    pub points: u32,
    pub next_level: ReadingLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}
