use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored quiz score (0-100) for one learner.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(user_id: &str, score: f64) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            score,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of grading one set of MCQ responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub score: u32,
    pub results: Vec<bool>,
}
