use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::domain::{learning_session::LearningSession, quiz_result::QuizResult};
use crate::services::adaptivity::ReadingLevel;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionEntry {
    pub level: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizEntry {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

/// The most recent sessions and quiz results of one learner, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Progress {
    pub sessions: Vec<SessionEntry>,
    pub quizzes: Vec<QuizEntry>,
}

impl From<&LearningSession> for SessionEntry {
    fn from(session: &LearningSession) -> Self {
        SessionEntry {
            level: session.level.clone(),
            timestamp: session.created_at,
        }
    }
}

impl From<&QuizResult> for QuizEntry {
    fn from(result: &QuizResult) -> Self {
        QuizEntry {
            score: result.score,
            timestamp: result.created_at,
        }
    }
}

/// Dashboard view derived from a learner's recent activity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_points: u32,
    pub last_quiz_score: Option<f64>,
    pub streak_days: u32,
    pub badges: Vec<String>,
    pub activity_dates: Vec<NaiveDate>,
    pub recommended_level: Option<ReadingLevel>,
    pub recent: Progress,
}
