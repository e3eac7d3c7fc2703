use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        progress::{QuizEntry, SessionEntry},
        LearningSession, Progress, ProgressSummary, QuizResult,
    },
    repositories::ProgressRepository,
    services::{adaptivity, gamification},
};

/// How many sessions and quiz results a progress view holds.
pub const RECENT_LIMIT: i64 = 5;

pub struct ProgressService {
    repository: Arc<dyn ProgressRepository>,
}

fn require_user_id(user_id: &str) -> AppResult<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::ValidationError("user_id must not be empty".to_string()));
    }
    Ok(user_id)
}

impl ProgressService {
    pub fn new(repository: Arc<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    pub async fn save_quiz_result(&self, user_id: &str, score: f64) -> AppResult<QuizResult> {
        let user_id = require_user_id(user_id)?;
        if !(0.0..=100.0).contains(&score) {
            return Err(AppError::ValidationError(format!(
                "score must be between 0 and 100, got {}",
                score
            )));
        }

        let result = self
            .repository
            .save_quiz_result(QuizResult::new(user_id, score))
            .await?;
        log::info!("Saved quiz result {} for user {}", result.id, user_id);
        Ok(result)
    }

    pub async fn save_session(
        &self,
        user_id: &str,
        raw_text: &str,
        simplified_text: &str,
        level: &str,
    ) -> AppResult<LearningSession> {
        let user_id = require_user_id(user_id)?;
        let level = level.trim();
        if level.is_empty() {
            return Err(AppError::ValidationError("level must not be empty".to_string()));
        }

        let session = self
            .repository
            .save_session(LearningSession::new_session(
                user_id,
                raw_text,
                simplified_text,
                level,
            ))
            .await?;
        log::info!("Saved learning session {} for user {}", session.id, user_id);
        Ok(session)
    }

    /// The five most recent sessions and quiz results, newest first.
    pub async fn get_progress(&self, user_id: &str) -> AppResult<Progress> {
        let user_id = require_user_id(user_id)?;

        let sessions = self
            .repository
            .recent_sessions(user_id, RECENT_LIMIT)
            .await?;
        let quizzes = self
            .repository
            .recent_quiz_results(user_id, RECENT_LIMIT)
            .await?;

        Ok(Progress {
            sessions: sessions.iter().map(SessionEntry::from).collect(),
            quizzes: quizzes.iter().map(QuizEntry::from).collect(),
        })
    }

    pub async fn summary(&self, user_id: &str) -> AppResult<ProgressSummary> {
        let recent = self.get_progress(user_id).await?;
        Ok(summarize(recent))
    }
}

/// Points, streak and badges over a progress view. Quiz points carry no reading bonus.
pub fn summarize(recent: Progress) -> ProgressSummary {
    let total_points = recent
        .quizzes
        .iter()
        .map(|q| gamification::award_points(q.score, 0.0))
        .sum();

    let mut activity_dates: Vec<NaiveDate> = recent
        .sessions
        .iter()
        .map(|s| s.timestamp.date_naive())
        .collect();
    activity_dates.sort_unstable();
    activity_dates.dedup();

    let streak_days = gamification::calculate_streak(&activity_dates);
    let last_quiz_score = recent.quizzes.first().map(|q| q.score);

    ProgressSummary {
        total_points,
        last_quiz_score,
        streak_days,
        badges: gamification::badges(total_points, streak_days)
            .into_iter()
            .map(str::to_string)
            .collect(),
        activity_dates,
        recommended_level: last_quiz_score.map(|score| adaptivity::next_level(score, 0.0)),
        recent,
    }
}
